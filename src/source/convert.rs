//! Arrow to record conversion
//!
//! Every cell is mapped to the closest `FieldValue`. Column types with no
//! direct counterpart fall back to Arrow's display string.

use crate::error::{Error, Result};
use crate::record::{FieldValue, Record, Timestamp};
use arrow::array::timezone::Tz;
use arrow::array::{
    Array, AsArray, BooleanArray, Date32Array, Date64Array, Float16Array, Float32Array,
    Float64Array, Int16Array, Int32Array, Int64Array, Int8Array, LargeListArray,
    LargeStringArray, ListArray, MapArray, StringArray, StringViewArray, StructArray,
    TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray, UInt16Array, UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::record_batch::RecordBatch;
use arrow::temporal_conversions::{
    timestamp_ms_to_datetime, timestamp_ns_to_datetime, timestamp_s_to_datetime,
    timestamp_us_to_datetime,
};
use arrow::util::display::array_value_to_string;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

/// Convert an Arrow RecordBatch to records
///
/// Returns one record per row, with fields in schema order.
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<Record>> {
    let schema = batch.schema();
    let mut records = Vec::with_capacity(batch.num_rows());

    for row in 0..batch.num_rows() {
        let mut record = Record::with_capacity(schema.fields().len());

        for (col, field) in schema.fields().iter().enumerate() {
            let value = array_value_to_field(batch.column(col).as_ref(), row)
                .map_err(|e| Error::decode(field.name(), e.to_string()))?;
            record.push(field.name().clone(), value);
        }

        records.push(record);
    }

    Ok(records)
}

/// Convert a single array element to a field value
pub fn array_value_to_field(array: &dyn Array, row: usize) -> Result<FieldValue> {
    if array.is_null(row) {
        return Ok(FieldValue::Null);
    }

    let value = match array.data_type() {
        DataType::Null => FieldValue::Null,

        DataType::Boolean => FieldValue::Bool(downcast::<BooleanArray>(array)?.value(row)),

        DataType::Int8 => FieldValue::Int(downcast::<Int8Array>(array)?.value(row).into()),
        DataType::Int16 => FieldValue::Int(downcast::<Int16Array>(array)?.value(row).into()),
        DataType::Int32 => FieldValue::Int(downcast::<Int32Array>(array)?.value(row).into()),
        DataType::Int64 => FieldValue::Int(downcast::<Int64Array>(array)?.value(row)),

        DataType::UInt8 => FieldValue::Int(downcast::<UInt8Array>(array)?.value(row).into()),
        DataType::UInt16 => FieldValue::Int(downcast::<UInt16Array>(array)?.value(row).into()),
        DataType::UInt32 => FieldValue::Int(downcast::<UInt32Array>(array)?.value(row).into()),
        DataType::UInt64 => {
            let val = downcast::<UInt64Array>(array)?.value(row);
            i64::try_from(val).map_or(FieldValue::UInt(val), FieldValue::Int)
        }

        DataType::Float16 => FieldValue::Float(downcast::<Float16Array>(array)?.value(row).to_f64()),
        DataType::Float32 => {
            FieldValue::Float(f64::from(downcast::<Float32Array>(array)?.value(row)))
        }
        DataType::Float64 => FieldValue::Float(downcast::<Float64Array>(array)?.value(row)),

        DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => {
            let text = array_value_to_string(array, row)?;
            text.parse::<f64>()
                .map_or(FieldValue::String(text), FieldValue::Float)
        }

        DataType::Utf8 => FieldValue::String(downcast::<StringArray>(array)?.value(row).to_string()),
        DataType::LargeUtf8 => {
            FieldValue::String(downcast::<LargeStringArray>(array)?.value(row).to_string())
        }
        DataType::Utf8View => {
            FieldValue::String(downcast::<StringViewArray>(array)?.value(row).to_string())
        }

        DataType::Timestamp(unit, tz) => {
            let utc = timestamp_value(array, row, *unit)?;
            match tz {
                Some(tz) => FieldValue::Timestamp(Timestamp::Zoned(with_zone(utc, tz))),
                None => FieldValue::Timestamp(Timestamp::Naive(utc)),
            }
        }

        DataType::Date32 => {
            let date = downcast::<Date32Array>(array)?
                .value_as_date(row)
                .ok_or_else(|| out_of_range(array))?;
            FieldValue::Timestamp(Timestamp::Date(date))
        }
        DataType::Date64 => {
            let date = downcast::<Date64Array>(array)?
                .value_as_date(row)
                .ok_or_else(|| out_of_range(array))?;
            FieldValue::Timestamp(Timestamp::Date(date))
        }

        DataType::List(_) => list_value(downcast::<ListArray>(array)?.value(row).as_ref())?,
        DataType::LargeList(_) => {
            list_value(downcast::<LargeListArray>(array)?.value(row).as_ref())?
        }

        DataType::Struct(_) => {
            let arr = downcast::<StructArray>(array)?;
            let mut fields = Vec::with_capacity(arr.num_columns());
            for (i, field) in arr.fields().iter().enumerate() {
                let val = array_value_to_field(arr.column(i).as_ref(), row)?;
                fields.push((field.name().clone(), val));
            }
            FieldValue::Object(fields)
        }

        DataType::Map(_, _) => {
            let entries = downcast::<MapArray>(array)?.value(row);
            let keys = entries.column(0);
            let values = entries.column(1);
            let mut fields = Vec::with_capacity(entries.len());
            for i in 0..entries.len() {
                let key = array_value_to_string(keys.as_ref(), i)?;
                fields.push((key, array_value_to_field(values.as_ref(), i)?));
            }
            FieldValue::Object(fields)
        }

        DataType::Dictionary(_, _) => {
            let dict = array
                .as_any_dictionary_opt()
                .ok_or_else(|| unexpected(array, "DictionaryArray"))?;
            let key = match array_value_to_field(dict.keys(), row)? {
                FieldValue::Int(i) => usize::try_from(i).ok(),
                FieldValue::UInt(u) => usize::try_from(u).ok(),
                _ => None,
            }
            .ok_or_else(|| out_of_range(array))?;
            array_value_to_field(dict.values().as_ref(), key)?
        }

        // Binary, durations, intervals and the like
        _ => FieldValue::String(array_value_to_string(array, row)?),
    };

    Ok(value)
}

fn downcast<T: 'static>(array: &dyn Array) -> Result<&T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| unexpected(array, std::any::type_name::<T>()))
}

fn unexpected(array: &dyn Array, expected: &str) -> Error {
    Error::Other(format!(
        "Failed to downcast {} column to {expected}",
        array.data_type()
    ))
}

fn out_of_range(array: &dyn Array) -> Error {
    Error::Other(format!("{} value out of range", array.data_type()))
}

fn list_value(items: &dyn Array) -> Result<FieldValue> {
    let mut values = Vec::with_capacity(items.len());
    for i in 0..items.len() {
        values.push(array_value_to_field(items, i)?);
    }
    Ok(FieldValue::Array(values))
}

/// Read a timestamp cell as a UTC date-time
fn timestamp_value(array: &dyn Array, row: usize, unit: TimeUnit) -> Result<NaiveDateTime> {
    let converted = match unit {
        TimeUnit::Second => {
            timestamp_s_to_datetime(downcast::<TimestampSecondArray>(array)?.value(row))
        }
        TimeUnit::Millisecond => {
            timestamp_ms_to_datetime(downcast::<TimestampMillisecondArray>(array)?.value(row))
        }
        TimeUnit::Microsecond => {
            timestamp_us_to_datetime(downcast::<TimestampMicrosecondArray>(array)?.value(row))
        }
        TimeUnit::Nanosecond => {
            timestamp_ns_to_datetime(downcast::<TimestampNanosecondArray>(array)?.value(row))
        }
    };
    converted.ok_or_else(|| out_of_range(array))
}

/// Attach the column's time zone. Unknown zones keep the UTC offset.
fn with_zone(utc: NaiveDateTime, tz: &str) -> DateTime<FixedOffset> {
    let instant = Utc.from_utc_datetime(&utc);
    match tz.parse::<Tz>() {
        Ok(tz) => instant.with_timezone(&tz).fixed_offset(),
        Err(_) => instant.fixed_offset(),
    }
}
