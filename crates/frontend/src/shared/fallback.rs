//! Degraded mode: what a page shows when a read fails.
//!
//! `LiveBackend` never substitutes anything. `LocalFixtures` hands back
//! placeholder content so the UI stays usable without a backend.

use super::api::ApiError;
use super::config::FallbackMode;
use chrono::{DateTime, Duration, Utc};
use contracts::dashboards::d100_fiscal_overview::{
    CategoryCount, CfopCount, DashboardSnapshot, DayActivity, NcmCount, NfeErrorAnalysis,
    NfeSnapshot, NfeStatistics, NfeValuesSummary, RecentChat, SystemStats,
};
use contracts::domain::a001_document::{Document, DocumentCategory, ProcessingStatus};
use contracts::domain::a002_chat_session::{ChatSession, CreateSessionRequest};
use contracts::domain::a003_chat_message::ChatMessage;
use contracts::shared::{PageRequest, PaginatedResponse};
use std::sync::Arc;

pub trait FallbackStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn sessions(&self, now: DateTime<Utc>) -> Option<Vec<ChatSession>>;

    fn transcript(&self, session_id: &str, now: DateTime<Utc>) -> Option<Vec<ChatMessage>>;

    /// Local stand-in for a session the backend failed to create
    fn created_session(&self, request: &CreateSessionRequest, now: DateTime<Utc>) -> Option<ChatSession>;

    fn documents(&self, page: PageRequest, now: DateTime<Utc>) -> Option<PaginatedResponse<Document>>;

    fn dashboard(&self, now: DateTime<Utc>) -> Option<DashboardSnapshot>;

    fn nfe(&self) -> Option<NfeSnapshot>;
}

pub fn strategy_for(mode: FallbackMode) -> Arc<dyn FallbackStrategy> {
    match mode {
        FallbackMode::Live => Arc::new(LiveBackend),
        FallbackMode::Fixtures => Arc::new(LocalFixtures),
    }
}

/// Value plus whether it came from placeholder data
#[derive(Debug, Clone, PartialEq)]
pub struct Recovered<T> {
    pub value: T,
    pub degraded: bool,
}

/// Substitute `fallback()` for a failed call.
///
/// Cancelled calls and local rejections are never recovered.
pub fn recover<T>(
    result: Result<T, ApiError>,
    fallback: impl FnOnce() -> Option<T>,
) -> Result<Recovered<T>, ApiError> {
    match result {
        Ok(value) => Ok(Recovered {
            value,
            degraded: false,
        }),
        Err(e @ (ApiError::Cancelled | ApiError::Invalid(_))) => Err(e),
        Err(e) => match fallback() {
            Some(value) => {
                log::warn!("usando dados locais: {e}");
                Ok(Recovered {
                    value,
                    degraded: true,
                })
            }
            None => Err(e),
        },
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LiveBackend;

impl FallbackStrategy for LiveBackend {
    fn name(&self) -> &'static str {
        "live"
    }

    fn sessions(&self, _now: DateTime<Utc>) -> Option<Vec<ChatSession>> {
        None
    }

    fn transcript(&self, _session_id: &str, _now: DateTime<Utc>) -> Option<Vec<ChatMessage>> {
        None
    }

    fn created_session(&self, _request: &CreateSessionRequest, _now: DateTime<Utc>) -> Option<ChatSession> {
        None
    }

    fn documents(&self, _page: PageRequest, _now: DateTime<Utc>) -> Option<PaginatedResponse<Document>> {
        None
    }

    fn dashboard(&self, _now: DateTime<Utc>) -> Option<DashboardSnapshot> {
        None
    }

    fn nfe(&self) -> Option<NfeSnapshot> {
        None
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFixtures;

const FIXTURE_SESSIONS: [(&str, &str, i64); 3] = [
    ("local-1", "ICMS - Vendas Interestaduais", 1),
    ("local-2", "Simples Nacional - Limites 2024", 2),
    ("local-3", "IPI - Produtos Isentos", 3),
];

impl FallbackStrategy for LocalFixtures {
    fn name(&self) -> &'static str {
        "fixtures"
    }

    fn sessions(&self, now: DateTime<Utc>) -> Option<Vec<ChatSession>> {
        let sessions = FIXTURE_SESSIONS
            .iter()
            .map(|(id, title, days)| {
                let mut session = ChatSession::local(*id, *title, now - Duration::days(*days));
                session.touch(now - Duration::hours(*days));
                session
            })
            .collect();
        Some(sessions)
    }

    fn transcript(&self, session_id: &str, now: DateTime<Utc>) -> Option<Vec<ChatMessage>> {
        let greeting = ChatMessage::assistant(
            session_id,
            "Olá! Sou o assistente ACFI. O servidor está indisponível no momento; \
             suas perguntas serão enviadas assim que a conexão voltar.",
            now,
        );
        Some(vec![greeting])
    }

    fn created_session(&self, request: &CreateSessionRequest, now: DateTime<Utc>) -> Option<ChatSession> {
        let id = format!("local-{}", uuid::Uuid::new_v4());
        let mut session = ChatSession::local(id, request.name.clone(), now);
        session.description = request.description.clone();
        Some(session)
    }

    fn documents(&self, page: PageRequest, now: DateTime<Utc>) -> Option<PaginatedResponse<Document>> {
        let samples = [
            ("lei_kandir_lc87_1996.pdf", DocumentCategory::Legislacao, 482_133, 214),
            ("ricms_sp_2000.pdf", DocumentCategory::Legislacao, 1_903_551, 871),
            ("nfe_35240112345678000190550010000012341000012345.xml", DocumentCategory::NotasFiscais, 9_812, 4),
        ];
        let docs: Vec<Document> = samples
            .iter()
            .enumerate()
            .map(|(i, (name, category, size, chunks))| Document {
                id: format!("local-doc-{}", i + 1),
                filename: name.to_string(),
                file_type: if name.ends_with(".xml") { "application/xml" } else { "application/pdf" }.to_string(),
                file_size: *size,
                content: None,
                category: *category,
                status: ProcessingStatus::Completed,
                chunks_count: *chunks,
                tags: None,
                processing_error: None,
                created_at: now - Duration::days(i as i64 + 1),
                processed_at: Some(now - Duration::days(i as i64 + 1)),
            })
            .collect();
        let slice = docs
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect();
        Some(PaginatedResponse::from_slice(slice, page))
    }

    fn dashboard(&self, now: DateTime<Utc>) -> Option<DashboardSnapshot> {
        let activity = (0..7)
            .rev()
            .map(|back| DayActivity {
                date: (now - Duration::days(back)).format("%Y-%m-%d").to_string(),
                chat_count: [3, 5, 2, 8, 4, 6, 1][back as usize],
            })
            .collect();
        Some(DashboardSnapshot {
            stats: SystemStats {
                total_documents: 3,
                total_chats: 29,
                total_sessions: 3,
            },
            recent_chats: vec![RecentChat {
                id: "local-chat-1".to_string(),
                question: "Como calcular ICMS sobre vendas interestaduais?".to_string(),
                created_at: Some(now.format("%Y-%m-%dT%H:%M:%S").to_string()),
                session_id: "local-1".to_string(),
            }],
            documents_by_category: vec![
                CategoryCount {
                    category: DocumentCategory::Legislacao.as_str().to_string(),
                    count: 2,
                },
                CategoryCount {
                    category: DocumentCategory::NotasFiscais.as_str().to_string(),
                    count: 1,
                },
            ],
            activity,
        })
    }

    fn nfe(&self) -> Option<NfeSnapshot> {
        Some(NfeSnapshot {
            statistics: NfeStatistics {
                total_nfes: 1,
                processed_nfes: 1,
                error_nfes: 0,
                processing_rate: 100.0,
                total_chunks: 4,
                avg_chunks_per_nfe: 4.0,
            },
            cfop_distribution: vec![CfopCount {
                cfop: "5102".to_string(),
                count: 1,
            }],
            ncm_top: vec![NcmCount {
                ncm: "84713012".to_string(),
                count: 1,
            }],
            values: NfeValuesSummary {
                total_value: 1_250.0,
                nfe_count: 1,
                average_value: 1_250.0,
                max_value: 1_250.0,
                min_value: 1_250.0,
            },
            timeline: Vec::new(),
            errors: NfeErrorAnalysis::default(),
        })
    }
}
