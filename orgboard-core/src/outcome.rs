/* Esito di un'operazione del service.
    Le condizioni di business previste non sono errori Rust ma varianti di questo enum:
    Success -> operazione completata, nessun payload
    Created -> entità creata, con il valore persistito
    NotFound -> entità assente o di un'altra organizzazione
    Conflict -> vincolo di unicità violato, con il motivo leggibile
    ValidationError -> input non valido o stato che non permette l'operazione
*/
use crate::error::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Success,
    Created(T),
    NotFound,
    Conflict(String),
    ValidationError(ValidationErrors),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Outcome::Created(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Outcome::Conflict(_))
    }

    /// Field errors if this is a `ValidationError`.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Outcome::ValidationError(errors) => Some(errors),
            _ => None,
        }
    }

    pub fn into_created(self) -> Option<T> {
        match self {
            Outcome::Created(value) => Some(value),
            _ => None,
        }
    }
}
