#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ActivityRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub icon: Option<String>,
    pub created_at: String,
}
