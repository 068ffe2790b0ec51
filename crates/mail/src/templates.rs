//! Message bodies for transactional email.

/// A rendered email: subject line plus plain-text and HTML bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Password-reset message pointing at `reset_url`.
pub fn password_reset(reset_url: &str, ttl_mins: i64) -> RenderedEmail {
    let subject = "NextCar - Restablecer contraseña".to_string();
    let text = format!(
        "Recibimos una solicitud para restablecer tu contraseña.\n\n\
         Abrí el siguiente enlace para elegir una nueva:\n{reset_url}\n\n\
         El enlace vence en {ttl_mins} minutos. Si no pediste este cambio, ignorá este mensaje."
    );
    let html = format!(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;\">\
         <h2>Restablecer contraseña</h2>\
         <p>Recibimos una solicitud para restablecer tu contraseña.</p>\
         <p><a href=\"{reset_url}\" style=\"background-color: #1a1a1a; color: #ffffff; \
         padding: 12px 24px; text-decoration: none; border-radius: 4px;\">Elegir nueva contraseña</a></p>\
         <p>El enlace vence en {ttl_mins} minutos.</p>\
         <p style=\"color: #666666; font-size: 12px;\">Si no pediste este cambio, ignorá este mensaje.</p>\
         </div>"
    );
    RenderedEmail {
        subject,
        text,
        html,
    }
}
