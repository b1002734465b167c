use uuid::Uuid;

/// Genera un nuovo id di messaggio (UUIDv4), unico tra tutte le organizzazioni.
pub fn new_message_id() -> Uuid {
    Uuid::new_v4()
}
