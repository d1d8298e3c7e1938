use async_trait::async_trait;
use serde_json::Value;

/// a single predicate on one field. filters on a query are conjunctive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    /// exact match.
    Eq { field: &'static str, value: String },
    /// case-insensitive substring match over a text field.
    ILike { field: &'static str, needle: String },
    /// array membership: the field contains this value.
    Contains { field: &'static str, value: String },
}

impl Filter {
    pub fn eq(field: &'static str, value: impl Into<String>) -> Self {
        Filter::Eq {
            field,
            value: value.into(),
        }
    }

    pub fn ilike(field: &'static str, needle: impl Into<String>) -> Self {
        Filter::ILike {
            field,
            needle: needle.into(),
        }
    }

    pub fn contains(field: &'static str, value: impl Into<String>) -> Self {
        Filter::Contains {
            field,
            value: value.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Order {
    pub field: &'static str,
    pub direction: Direction,
}

impl Order {
    pub fn asc(field: &'static str) -> Self {
        Order {
            field,
            direction: Direction::Ascending,
        }
    }

    pub fn desc(field: &'static str) -> Self {
        Order {
            field,
            direction: Direction::Descending,
        }
    }
}

/// one select round trip: a column projection, a conjunction of filters,
/// an optional order and an optional row limit.
#[derive(Clone, Debug)]
pub struct SelectQuery {
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    pub limit: Option<u32>,
}

impl SelectQuery {
    pub fn new(columns: impl Into<String>) -> Self {
        SelectQuery {
            columns: columns.into(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// opaque gateway to the hosted relational store. two collections live
/// behind it (`books` and `quotes`); rows go over the wire as plain json.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert(&self, collection: &str, record: Value) -> anyhow::Result<()>;

    async fn select(&self, collection: &str, query: &SelectQuery) -> anyhow::Result<Vec<Value>>;
}

/// render a select query to postgrest-style query parameters.
fn query_pairs(query: &SelectQuery) -> Vec<(String, String)> {
    let mut pairs = vec![("select".to_string(), query.columns.clone())];

    for filter in &query.filters {
        let pair = match filter {
            Filter::Eq { field, value } => (field.to_string(), format!("eq.{value}")),
            Filter::ILike { field, needle } => (field.to_string(), format!("ilike.*{needle}*")),
            Filter::Contains { field, value } => (field.to_string(), format!("cs.{{{value}}}")),
        };

        pairs.push(pair);
    }

    if let Some(order) = query.order {
        let direction = match order.direction {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        };

        pairs.push(("order".to_string(), format!("{}.{}", order.field, direction)));
    }

    if let Some(limit) = query.limit {
        pairs.push(("limit".to_string(), limit.to_string()));
    }

    pairs
}

/// pull a human-readable message out of a store error body. the store
/// answers errors as json with a `message` field; anything else is passed
/// through as-is.
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("store request failed with status {status}")
            } else {
                body.trim().to_string()
            }
        })
}

#[derive(Clone)]
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl RestStore {
    pub fn new(client: reqwest::Client, base_url: &str, anon_key: &str) -> Self {
        RestStore {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection)
    }
}

#[async_trait]
impl Store for RestStore {
    async fn insert(&self, collection: &str, record: Value) -> anyhow::Result<()> {
        let resp = self
            .client
            .post(self.collection_url(collection))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, collection, "an error occurred when reaching the store"),
            )?;

        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(status, &body);

            tracing::error!(%status, collection, message = %message, "the store rejected an insert");
            anyhow::bail!("{message}");
        }

        Ok(())
    }

    async fn select(&self, collection: &str, query: &SelectQuery) -> anyhow::Result<Vec<Value>> {
        let resp = self
            .client
            .get(self.collection_url(collection))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .query(&query_pairs(query))
            .send()
            .await
            .inspect_err(
                |e| tracing::error!(err = ?e, collection, "an error occurred when reaching the store"),
            )?;

        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(status, &body);

            tracing::error!(%status, collection, message = %message, "the store rejected a select");
            anyhow::bail!("{message}");
        }

        let rows = resp.json().await.inspect_err(
            |e| tracing::error!(err = ?e, collection, "an error occurred when decoding store rows"),
        )?;

        Ok(rows)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_predicate_kind() {
        let query = SelectQuery::new("id,text,tags")
            .filters(vec![
                Filter::eq("user_id", "u1"),
                Filter::eq("book_id", "b7"),
                Filter::contains("tags", "love"),
                Filter::ilike("text", "dream"),
            ])
            .order(Order::desc("created_at"))
            .limit(5);

        assert_eq!(
            query_pairs(&query),
            vec![
                ("select".to_string(), "id,text,tags".to_string()),
                ("user_id".to_string(), "eq.u1".to_string()),
                ("book_id".to_string(), "eq.b7".to_string()),
                ("tags".to_string(), "cs.{love}".to_string()),
                ("text".to_string(), "ilike.*dream*".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn bare_query_renders_projection_only() {
        let query = SelectQuery::new("*");

        assert_eq!(
            query_pairs(&query),
            vec![("select".to_string(), "*".to_string())]
        );
    }

    #[test]
    fn ascending_order_renders_asc() {
        let query = SelectQuery::new("id,title").order(Order::asc("title"));

        assert_eq!(
            query_pairs(&query).last().unwrap().1,
            "title.asc".to_string()
        );
    }

    #[test]
    fn error_message_prefers_the_store_message_field() {
        let status = reqwest::StatusCode::CONFLICT;

        assert_eq!(
            error_message(status, r#"{"message":"duplicate key value"}"#),
            "duplicate key value"
        );
        assert_eq!(error_message(status, "plain text error"), "plain text error");
        assert_eq!(
            error_message(status, ""),
            "store request failed with status 409 Conflict"
        );
    }
}
