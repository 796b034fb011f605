// src/services/email_queue.rs

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

const EMAIL_QUEUE_KEY: &str = "email:queue";
const EMAIL_DEAD_LETTER_KEY: &str = "email:dead";
const POP_TIMEOUT_SECS: f64 = 5.0;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BACKOFF: Duration = Duration::from_secs(5);

// Canal de entrega plugável; hoje só SMTP, via Mailer.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    async fn deliver(&self, job: &EmailJob) -> Result<(), AppError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    pub to: String,
    pub subject: String,
    pub html: String,
    #[serde(default)]
    pub attempts: u32,
}

impl EmailJob {
    pub fn new(to: String, subject: String, html: String) -> Self {
        Self {
            to,
            subject,
            html,
            attempts: 0,
        }
    }
}

// Fila de e-mails sobre uma lista no Redis. Os handlers enfileiram e seguem
// em frente; a entrega acontece no worker, nunca no caminho da requisição.
#[derive(Clone)]
pub struct EmailQueue {
    manager: ConnectionManager,
}

impl EmailQueue {
    pub async fn connect(host: &str, port: u16) -> Result<Self, AppError> {
        let client = redis::Client::open(format!("redis://{host}:{port}"))?;
        let manager = ConnectionManager::new(client).await?;
        tracing::info!("✅ Conexão com o broker da fila estabelecida com sucesso!");
        Ok(Self { manager })
    }

    pub async fn enqueue(&self, job: &EmailJob) -> Result<(), AppError> {
        let payload = serde_json::to_string(job)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar job de e-mail: {}", e))?;
        let mut conn = self.manager.clone();
        let _: () = conn.lpush(EMAIL_QUEUE_KEY, payload).await?;
        Ok(())
    }

    /// Loop do worker: consome a fila e entrega pelo provider. Roda numa
    /// task própria, do início ao fim do processo.
    pub async fn run_worker(self, provider: Arc<dyn NotificationProvider>) {
        tracing::info!("📬 Worker da fila de e-mails iniciado");
        let mut conn = self.manager.clone();

        loop {
            let popped: Result<Option<(String, String)>, redis::RedisError> =
                conn.brpop(EMAIL_QUEUE_KEY, POP_TIMEOUT_SECS).await;

            let payload = match popped {
                Ok(Some((_, payload))) => payload,
                Ok(None) => continue, // timeout do BRPOP, fila vazia
                Err(e) => {
                    tracing::error!("🔥 Falha ao consumir a fila de e-mails: {}", e);
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    continue;
                }
            };

            let job: EmailJob = match serde_json::from_str(&payload) {
                Ok(job) => job,
                Err(e) => {
                    tracing::error!("Job de e-mail ilegível, descartando: {}", e);
                    continue;
                }
            };

            if let Err(e) = provider.deliver(&job).await {
                self.handle_failure(job, &e).await;
            }
        }
    }

    // Reenfileira com backoff linear; estourado o limite de tentativas, o
    // job vai para a lista de descarte em vez de sumir.
    async fn handle_failure(&self, mut job: EmailJob, err: &AppError) {
        job.attempts += 1;

        if job.attempts >= MAX_ATTEMPTS {
            tracing::error!(
                "Entrega para {} falhou {} vezes, movendo para a lista de descarte: {}",
                job.to,
                job.attempts,
                err
            );
            let _ = self.push(EMAIL_DEAD_LETTER_KEY, &job).await;
            return;
        }

        tracing::warn!(
            "Entrega para {} falhou (tentativa {}), reenfileirando: {}",
            job.to,
            job.attempts,
            err
        );
        tokio::time::sleep(RETRY_BACKOFF * job.attempts).await;
        let _ = self.push(EMAIL_QUEUE_KEY, &job).await;
    }

    async fn push(&self, key: &str, job: &EmailJob) -> Result<(), AppError> {
        let payload = serde_json::to_string(job)
            .map_err(|e| anyhow::anyhow!("Falha ao serializar job de e-mail: {}", e))?;
        let mut conn = self.manager.clone();
        let _: () = conn.lpush(key, payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_sem_attempts_desserializa_zerado() {
        let job: EmailJob = serde_json::from_str(
            r#"{"to":"a@b.com","subject":"Oi","html":"<p>Oi</p>"}"#,
        )
        .unwrap();
        assert_eq!(job.attempts, 0);

        let roundtrip: EmailJob =
            serde_json::from_str(&serde_json::to_string(&job).unwrap()).unwrap();
        assert_eq!(roundtrip.to, "a@b.com");
        assert_eq!(roundtrip.subject, "Oi");
    }
}
