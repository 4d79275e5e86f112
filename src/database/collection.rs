/// Fixed database namespace holding every collection of this service.
pub const DATABASE_NAMESPACE: &str = "service_catalog";

/// Columns of the services collection, in storage order.
pub const SERVICE_COLUMNS: &[&str] = &["id", "name", "description", "versions", "created_at"];

/// Text columns; these sort by byte order.
pub const SERVICE_TEXT_COLUMNS: &[&str] = &["id", "name", "description"];

/// A collection resolved within the fixed database namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub namespace: &'static str,
    pub name: &'static str,
}

impl Collection {
    pub const fn new(name: &'static str) -> Self {
        Self { namespace: DATABASE_NAMESPACE, name }
    }

    pub const fn services() -> Self {
        Self::new("services")
    }

    /// Quoted `"namespace"."name"` for use in SQL.
    pub fn qualified(&self) -> String {
        format!("\"{}\".\"{}\"", self.namespace, self.name)
    }
}
