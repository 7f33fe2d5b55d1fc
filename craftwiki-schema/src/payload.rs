use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One table row as an ordered list of scalar values (`SELECT *` column order).
pub type TableRow = Vec<Value>;

/// Body of `GET /category/{category}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub status: u16,
    pub data: Vec<TableRow>,
}

impl CategoryData {
    pub fn ok(data: Vec<TableRow>) -> Self {
        Self { status: 200, data }
    }
}

/// Body of `GET /category/{category}/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryData {
    pub status: u16,
    pub data: TableRow,
}

impl EntryData {
    pub fn ok(data: TableRow) -> Self {
        Self { status: 200, data }
    }
}

/// Body of a successful upload. The HTTP status is 201 while `status` stays 200.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertAck {
    pub status: u16,
    pub lastrowid: i64,
}

impl InsertAck {
    pub fn new(lastrowid: i64) -> Self {
        Self {
            status: 200,
            lastrowid,
        }
    }
}

/// Body of a successful edit or delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowCountAck {
    pub status: u16,
    pub rowcount: u64,
}

impl RowCountAck {
    pub fn new(rowcount: u64) -> Self {
        Self {
            status: 201,
            rowcount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub status: u16,
    pub error: String,
}

impl ErrorPayload {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn category_data_keeps_rows_as_arrays() {
        let body = CategoryData::ok(vec![vec![
            json!(1),
            json!("Stick"),
            json!("A wooden stick"),
            json!("misc"),
        ]]);
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"status":200,"data":[[1,"Stick","A wooden stick","misc"]]}"#
        );
    }

    #[test]
    fn acks_carry_their_fixed_status_field() {
        assert_eq!(
            serde_json::to_value(InsertAck::new(7)).unwrap(),
            json!({"status": 200, "lastrowid": 7})
        );
        assert_eq!(
            serde_json::to_value(RowCountAck::new(0)).unwrap(),
            json!({"status": 201, "rowcount": 0})
        );
    }
}
