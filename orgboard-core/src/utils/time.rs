use time::OffsetDateTime;

/// Restituisce l'istante corrente in UTC (serializzato come RFC3339, es. "2025-11-02T12:34:56.789Z").
pub fn now_utc() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}
