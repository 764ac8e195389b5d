//! User-facing error state owned by each view.
//!
//! A [`ViewError`] is what a view keeps after a registry call fails: the
//! error category, the status code if any, one user-facing message and
//! whether a retry control is shown. Transport detail never reaches it.

use serde::Serialize;

use locator_core::{ErrorKind, RegistryError};

/// Which view an error is being shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContext {
    List,
    Detail,
    Tip,
}

/// Error state displayed in place of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message}")]
pub struct ViewError {
    pub kind: ErrorKind,
    pub status: Option<u16>,
    pub message: &'static str,
    /// Whether a retry control is shown: transient kinds plus
    /// `MalformedResponse`, which is a failed load the user may repeat.
    pub retryable: bool,
}

impl ViewError {
    pub fn from_registry(err: &RegistryError, context: ViewContext) -> Self {
        Self {
            kind: err.kind,
            status: err.status,
            message: user_message(err.kind, context),
            retryable: err.kind.is_transient() || err.kind == ErrorKind::MalformedResponse,
        }
    }
}

/// The message shown for `kind` in `context`.
pub fn user_message(kind: ErrorKind, context: ViewContext) -> &'static str {
    match (kind, context) {
        (ErrorKind::NotFound, ViewContext::List) => "Nenhum resultado encontrado.",
        (ErrorKind::NotFound, _) => "Pessoa não encontrada.",
        (ErrorKind::InvalidArgument, ViewContext::Tip) => {
            "Dados inválidos. Verifique as informações e tente novamente."
        }
        (ErrorKind::InvalidArgument, _) => "Identificador inválido.",
        (ErrorKind::ServerUnavailable, _) => "Servidor indisponível. Tente novamente mais tarde.",
        (ErrorKind::NetworkFailure, _) => {
            "Falha na conexão. Verifique sua internet e tente novamente."
        }
        (ErrorKind::MalformedResponse, _) => {
            "Resposta inesperada do servidor. Tente novamente mais tarde."
        }
        (ErrorKind::Unknown, ViewContext::Tip) => "Erro ao enviar. Tente novamente.",
        (ErrorKind::Unknown, _) => "Ocorreu um erro inesperado. Tente novamente.",
    }
}

#[cfg(test)]
mod tests {
    use locator_core::RawFailure;

    use super::*;

    #[test]
    fn every_kind_has_a_message() {
        let kinds = [
            ErrorKind::InvalidArgument,
            ErrorKind::NotFound,
            ErrorKind::ServerUnavailable,
            ErrorKind::NetworkFailure,
            ErrorKind::MalformedResponse,
            ErrorKind::Unknown,
        ];
        for kind in kinds {
            for context in [ViewContext::List, ViewContext::Detail, ViewContext::Tip] {
                assert!(!user_message(kind, context).is_empty());
            }
        }
    }

    #[test]
    fn transport_detail_is_not_shown() {
        let err = RegistryError::from_raw(
            RawFailure::NoResponse,
            "error sending request for url (http://10.0.0.1/v1/pessoas): connection refused",
        );
        let view = ViewError::from_registry(&err, ViewContext::List);
        assert!(!view.message.contains("10.0.0.1"));
        assert!(view.retryable);
        assert_eq!(view.kind, ErrorKind::NetworkFailure);
    }

    #[test]
    fn malformed_response_offers_retry() {
        let err = RegistryError::from_raw(RawFailure::BadBody, "expected a sequence");
        for context in [ViewContext::List, ViewContext::Detail] {
            let view = ViewError::from_registry(&err, context);
            assert_eq!(view.kind, ErrorKind::MalformedResponse);
            assert!(view.retryable);
        }
        assert!(!ErrorKind::MalformedResponse.is_transient());
    }

    #[test]
    fn not_found_is_not_retryable() {
        let err = RegistryError::from_raw(RawFailure::Status(404), "nope");
        let view = ViewError::from_registry(&err, ViewContext::Detail);
        assert_eq!(view.message, "Pessoa não encontrada.");
        assert_eq!(view.status, Some(404));
        assert!(!view.retryable);
    }
}
