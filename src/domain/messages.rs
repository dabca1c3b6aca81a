use super::outcome::PollOutcome;
use super::reject_codes;

pub const GENERIC_ERROR_MESSAGE: &str =
    "Lo sentimos, tenemos problemas. Por favor, intente nuevamente.";
const SERVER_MESSAGE_PREFIX: &str = "Lo sentimos, tenemos problemas y el mensaje del servidor: ";

// Messages authored client-side; they are shown as-is.
const CLIENT_MESSAGE_PREFIXES: &[&str] = &[
    "No hay",
    "Error al",
    "El tiempo de espera ha expirado",
    "El pago fue rechazado",
    "No se recibió",
    "No se pudieron",
    "Solo se pudieron",
];

/// Wraps a server-supplied message in the storefront's apology prefix.
/// Client-authored messages pass through unchanged.
pub fn format_server_error(message: &str) -> String {
    if message.is_empty() {
        return GENERIC_ERROR_MESSAGE.to_string();
    }

    if CLIENT_MESSAGE_PREFIXES
        .iter()
        .any(|prefix| message.starts_with(prefix))
    {
        message.to_string()
    } else {
        format!("{}{}", SERVER_MESSAGE_PREFIX, message)
    }
}

/// The single line of text shown to the buyer for a terminal outcome.
pub fn user_message(outcome: &PollOutcome) -> String {
    match outcome {
        PollOutcome::Accepted { ref_ibp, .. } => match ref_ibp {
            Some(reference) => format!("Pago confirmado. Referencia: {}", reference),
            None => "Pago confirmado.".to_string(),
        },
        PollOutcome::Rejected {
            reason_text,
            reject_code,
        } => {
            let base = format_server_error(reason_text);
            match reject_code
                .as_deref()
                .and_then(|code| reject_codes::describe(code).map(|text| (code, text)))
            {
                Some((code, description)) => format!("{} ({}: {})", base, code, description),
                None => base,
            }
        }
        PollOutcome::TimedOut { reason_text } => format_server_error(reason_text),
    }
}
