use crate::shared::ids::string_or_number;
use serde::{Deserialize, Serialize};

/// `GET /dashboard/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub total_chats: u64,
    #[serde(default)]
    pub total_sessions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentChat {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub question: String,
    /// ISO date, kept as text: the dashboard only formats it
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub session_id: String,
}

/// `GET /dashboard/recent_chats?limit=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentChatsResponse {
    #[serde(default)]
    pub recent_chats: Vec<RecentChat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// `GET /dashboard/documents_by_category`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentsByCategoryResponse {
    #[serde(default)]
    pub documents_by_category: Vec<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    /// YYYY-MM-DD
    pub date: String,
    pub chat_count: u64,
}

/// `GET /dashboard/activity_by_day?days=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityResponse {
    #[serde(default)]
    pub activity: Vec<DayActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSession {
    #[serde(deserialize_with = "string_or_number")]
    pub session_id: String,
    #[serde(default)]
    pub session_name: Option<String>,
    pub chat_count: u64,
}

/// `GET /dashboard/most_active_sessions?limit=`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveSessionsResponse {
    #[serde(default)]
    pub active_sessions: Vec<ActiveSession>,
}

/// `GET /dashboard/nfe/statistics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NfeStatistics {
    #[serde(default)]
    pub total_nfes: u64,
    #[serde(default)]
    pub processed_nfes: u64,
    #[serde(default)]
    pub error_nfes: u64,
    /// Percentage, 0..=100
    #[serde(default)]
    pub processing_rate: f64,
    #[serde(default)]
    pub total_chunks: u64,
    #[serde(default)]
    pub avg_chunks_per_nfe: f64,
}

impl NfeStatistics {
    pub fn pending_nfes(&self) -> u64 {
        self.total_nfes
            .saturating_sub(self.processed_nfes)
            .saturating_sub(self.error_nfes)
    }

    pub fn error_rate(&self) -> f64 {
        if self.total_nfes == 0 {
            0.0
        } else {
            self.error_nfes as f64 / self.total_nfes as f64 * 100.0
        }
    }
}

/// Row of `GET /dashboard/nfe/cfop_distribution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CfopCount {
    pub cfop: String,
    pub count: u64,
}

/// Row of `GET /dashboard/nfe/ncm_top?limit=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NcmCount {
    pub ncm: String,
    pub count: u64,
}

/// `GET /dashboard/nfe/values_summary`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NfeValuesSummary {
    #[serde(default)]
    pub total_value: f64,
    #[serde(default)]
    pub nfe_count: u64,
    #[serde(default)]
    pub average_value: f64,
    #[serde(default)]
    pub max_value: f64,
    #[serde(default)]
    pub min_value: f64,
}

/// Row of `GET /dashboard/nfe/processing_timeline?days=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NfeTimelinePoint {
    pub date: String,
    pub nfe_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileTypeErrorCount {
    pub file_type: String,
    pub count: u64,
}

/// `GET /dashboard/nfe/error_analysis`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NfeErrorAnalysis {
    #[serde(default)]
    pub total_errors: u64,
    #[serde(default)]
    pub error_by_type: Vec<FileTypeErrorCount>,
    #[serde(default)]
    pub error_rate: f64,
}

/// Everything the overview cards need, loaded together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub stats: SystemStats,
    pub recent_chats: Vec<RecentChat>,
    pub documents_by_category: Vec<CategoryCount>,
    pub activity: Vec<DayActivity>,
}

impl DashboardSnapshot {
    pub fn busiest_day(&self) -> Option<&DayActivity> {
        self.activity
            .iter()
            .filter(|d| d.chat_count > 0)
            .max_by(|a, b| a.chat_count.cmp(&b.chat_count).then_with(|| b.date.cmp(&a.date)))
    }

    pub fn chats_in_period(&self) -> u64 {
        self.activity.iter().map(|d| d.chat_count).sum()
    }

    pub fn documents_total(&self) -> u64 {
        self.documents_by_category.iter().map(|c| c.count).sum()
    }
}

/// Fiscal-note (NFe) section of the dashboard
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NfeSnapshot {
    pub statistics: NfeStatistics,
    pub cfop_distribution: Vec<CfopCount>,
    pub ncm_top: Vec<NcmCount>,
    pub values: NfeValuesSummary,
    pub timeline: Vec<NfeTimelinePoint>,
    pub errors: NfeErrorAnalysis,
}
