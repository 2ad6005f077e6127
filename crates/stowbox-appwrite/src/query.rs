use serde_json::{json, Value};

/// A query operator in the backend's JSON wire format.
///
/// The REST API takes each operator as a serialized JSON object in a
/// repeated `queries[]` parameter, e.g.
/// `{"method":"equal","attribute":"email","values":["a@b.c"]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query(Value);

impl Query {
    /// Match documents whose attribute equals any of the given values.
    pub fn equal<V: Into<Value>>(attribute: &str, values: impl IntoIterator<Item = V>) -> Self {
        Query(json!({
            "method": "equal",
            "attribute": attribute,
            "values": values.into_iter().map(Into::into).collect::<Vec<Value>>(),
        }))
    }

    /// Match documents whose attribute contains any of the given values.
    /// For string attributes this is a substring match; for arrays,
    /// membership.
    pub fn contains<V: Into<Value>>(attribute: &str, values: impl IntoIterator<Item = V>) -> Self {
        Query(json!({
            "method": "contains",
            "attribute": attribute,
            "values": values.into_iter().map(Into::into).collect::<Vec<Value>>(),
        }))
    }

    /// Match documents satisfying any of the nested queries.
    pub fn or(queries: impl IntoIterator<Item = Query>) -> Self {
        Query(json!({
            "method": "or",
            "values": queries.into_iter().map(|q| q.0).collect::<Vec<Value>>(),
        }))
    }

    pub fn order_asc(attribute: &str) -> Self {
        Query(json!({ "method": "orderAsc", "attribute": attribute }))
    }

    pub fn order_desc(attribute: &str) -> Self {
        Query(json!({ "method": "orderDesc", "attribute": attribute }))
    }

    pub fn limit(count: u64) -> Self {
        Query(json!({ "method": "limit", "values": [count] }))
    }

    /// The serialized form sent in the `queries[]` parameter.
    pub fn to_wire(&self) -> String {
        self.0.to_string()
    }

    #[cfg(test)]
    fn as_value(&self) -> &Value {
        &self.0
    }
}
