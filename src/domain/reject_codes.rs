//! Descriptions for the reject codes the bank debit rail reports alongside `RJCT`.
//!
//! Codes follow ISO 20022 external status reason codes.

const REJECT_CODES: &[(&str, &str)] = &[
    ("AB01", "El proceso fue abortado por tiempo de espera en la compensación"),
    ("AB07", "El banco del pagador no está disponible"),
    ("AC01", "El número de cuenta es incorrecto"),
    ("AC04", "La cuenta se encuentra cerrada"),
    ("AC06", "La cuenta se encuentra bloqueada"),
    ("AG01", "La operación no está permitida para esta cuenta"),
    ("AM02", "El monto excede el máximo permitido"),
    ("AM04", "Fondos insuficientes"),
    ("AM05", "Operación duplicada"),
    ("BE01", "Los datos del titular no coinciden con la cuenta"),
    ("CUST", "Operación cancelada por el cliente"),
    ("DU01", "Identificador de mensaje duplicado"),
    ("FF05", "El código de producto es inválido"),
    ("MD09", "El código OTP es inválido o ha expirado"),
    ("RC01", "El código del banco es incorrecto"),
    ("TM01", "La operación fue recibida fuera del horario permitido"),
];

/// Looks up the user-facing description for a reject code, ignoring case.
pub fn describe(code: &str) -> Option<&'static str> {
    let code = code.trim();
    REJECT_CODES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, description)| *description)
}
