use crate::error::Error;
use sea_orm::strum::IntoEnumIterator;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Value};
use std::collections::HashMap;

/// `QueryFilterMap` carries filter parameters from a web request down to the
/// database query layer. Keys are column names, values are optional `sea_orm`
/// values; a key mapped to `None` is ignored.
///
/// # Example
///
/// ```
/// use sea_orm::Value;
/// use entity_api::query::QueryFilterMap;
///
/// let mut query_filter_map = QueryFilterMap::new();
/// query_filter_map.insert("status".to_string(), Some(Value::String(Some(Box::new("active".to_string())))));
/// assert!(query_filter_map.get("status").is_some());
/// assert!(query_filter_map.get("offering_id").is_none());
/// ```
pub struct QueryFilterMap {
    map: HashMap<String, Option<Value>>,
}

impl QueryFilterMap {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        // HashMap.get returns an Option and so we need to "flatten" this to a single Option
        self.map
            .get(key)
            .and_then(|inner_option| inner_option.clone())
    }

    pub fn insert(&mut self, key: String, value: Option<Value>) {
        self.map.insert(key, value);
    }
}

impl Default for QueryFilterMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts request parameters into a `QueryFilterMap`.
pub trait IntoQueryFilterMap {
    fn into_query_filter_map(self) -> QueryFilterMap;
}

/// Find all records of an entity by the given query filter map, ordered by `order_by`
/// ascending when given.
pub async fn find_by<E, C>(
    db: &impl ConnectionTrait,
    query_filter_map: QueryFilterMap,
    order_by: Option<C>,
) -> Result<Vec<E::Model>, Error>
where
    E: EntityTrait<Column = C>,
    C: ColumnTrait + IntoEnumIterator,
{
    let mut query = E::find();

    // We iterate through the entity's defined columns so that we only attempt
    // to filter by columns that exist.
    for column in C::iter() {
        if let Some(value) = query_filter_map.get(&column.to_string()) {
            query = query.filter(column.eq(value));
        }
    }

    if let Some(column) = order_by {
        query = query.order_by_asc(column);
    }

    Ok(query.all(db).await?)
}
