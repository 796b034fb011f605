// src/services/mailer.rs

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::common::error::AppError;
use crate::services::email_queue::{EmailJob, NotificationProvider};

// Transporte SMTP construído uma vez no boot, a partir das variáveis
// SMTP_* obrigatórias.
#[derive(Clone)]
pub struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl Mailer {
    pub fn new(
        host: &str,
        port: u16,
        user: &str,
        pass: &str,
        from_email: &str,
    ) -> anyhow::Result<Self> {
        let credentials = Credentials::new(user.to_string(), pass.to_string());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
            .port(port)
            .credentials(credentials)
            .build();
        let from = from_email
            .parse::<Mailbox>()
            .map_err(|e| anyhow::anyhow!("FROM_EMAIL inválido: {}", e))?;
        Ok(Self { transport, from })
    }

    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), AppError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(to
                .parse()
                .map_err(|e| anyhow::anyhow!("Destinatário inválido: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| anyhow::anyhow!("Falha ao montar a mensagem: {}", e))?;

        self.transport.send(message).await?;
        Ok(())
    }
}

#[async_trait]
impl NotificationProvider for Mailer {
    async fn deliver(&self, job: &EmailJob) -> Result<(), AppError> {
        self.send(&job.to, &job.subject, &job.html).await
    }
}
