use sqlx::FromRow;
use wirekit_core::model::Client;
use wirekit_core::types::{EntityId, Timestamp};

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow)]
pub struct ClientRow {
    pub id: EntityId,
    pub name: String,
    pub created_at: Timestamp,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}
