use serde::Deserialize;

#[derive(Deserialize)]
pub struct MonthQuery {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "type")]
    pub window_type: Option<String>,
}

#[derive(Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
    /// Optional filter inputs; both must be present for filtering to apply.
    pub duration: Option<i64>,
    #[serde(rename = "partySize")]
    pub party_size: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookingRequest {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub resource_id: Option<RoomRef>,
    pub duration: Option<IntOrString>,
    pub party_size: Option<IntOrString>,
    pub notes: Option<String>,
}

/// The form may submit either the scheduler's numeric resource id or the
/// room's derived slug; slugs are resolved against the live resource list.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum RoomRef {
    Id(i64),
    Slug(String),
}

/// Form fields arrive as either JSON numbers or strings depending on the
/// client; tolerate both.
#[derive(Clone, Deserialize)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

impl IntOrString {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for IntOrString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Deserialize)]
pub struct VerifyPasswordRequest {
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct SubscribeRequest {
    pub email: Option<String>,
    /// Accepted from the form but not forwarded; the mailing-list provider
    /// keys contacts on email alone.
    pub name: Option<String>,
}
