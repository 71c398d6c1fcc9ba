use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use std::time::Duration as StdDuration;

use chrono::{Duration, Local, NaiveDate, NaiveTime, TimeZone};
use regex::Regex;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::domain::models::slot::TimeSlot;
use crate::infra::scheduler::SchedulerError;
use crate::infra::scheduler::types::{
    AuthenticationResponse, BookingParams, CreateReservation, CustomAttribute,
    ReservationOutcome, Resource, ResourcesEnvelope, Session, SlotsEnvelope,
};

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const SERVICES_PREFIX: &str = "/Services/index.php";
const DEFAULT_BOOKING_TITLE: &str = "Room Booking";
const NOTES_ATTRIBUTE_ID: i64 = 5;

/// Client for the external scheduler's REST API. One instance per inbound
/// request: the session is cached inside the instance and never shared.
pub struct SchedulerClient {
    http: Client,
    config: SchedulerConfig,
    session: Option<Session>,
}

impl SchedulerClient {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            http: Client::builder()
                .timeout(StdDuration::from_secs(30))
                .build()
                .unwrap_or_else(|_| Client::new()),
            config,
            session: None,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}{}", self.config.base_url, SERVICES_PREFIX, endpoint)
    }

    /// Submits credentials and caches the returned session token + user id.
    pub async fn authenticate(&mut self) -> Result<Session, SchedulerError> {
        let response = self
            .http
            .post(self.url("/Authentication/Authenticate"))
            .json(&json!({
                "username": self.config.username,
                "password": self.config.password,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SchedulerError::Auth(format!("{status} {body}")));
        }

        let data: AuthenticationResponse = response.json().await?;

        if !data.is_authenticated {
            return Err(SchedulerError::Auth("Invalid credentials".to_string()));
        }

        let session = Session {
            token: data.session_token,
            user_id: data.user_id,
        };
        self.session = Some(session.clone());

        Ok(session)
    }

    /// Lazily authenticates when no session is cached. Token freshness is
    /// never checked: a request failing on an expired session surfaces as an
    /// upstream error and is not retried with a new session.
    async fn ensure_authenticated(&mut self) -> Result<(), SchedulerError> {
        if self.session.is_none() {
            self.authenticate().await?;
        }
        Ok(())
    }

    /// Invalidates the session with the external service. No-op without a
    /// cached session; local state is cleared regardless of the outcome.
    pub async fn sign_out(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        let result = self
            .http
            .post(self.url("/Authentication/SignOut"))
            .header("X-Booked-SessionToken", &session.token)
            .header("X-Booked-UserId", session.user_id.to_string())
            .send()
            .await;

        if let Err(e) = result {
            debug!("Sign-out request failed (session dropped locally): {e}");
        }
    }

    async fn request_json<T: DeserializeOwned>(
        &mut self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<T, SchedulerError> {
        self.ensure_authenticated().await?;

        // ensure_authenticated just populated this.
        let session = self
            .session
            .clone()
            .ok_or_else(|| SchedulerError::Auth("no session after authentication".to_string()))?;

        let mut request = self
            .http
            .request(method, self.url(endpoint))
            .header("X-Booked-SessionToken", &session.token)
            .header("X-Booked-UserId", session.user_id.to_string());

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SchedulerError::Upstream { status, body: text });
        }

        serde_json::from_str(&text).map_err(|e| SchedulerError::Upstream {
            status,
            body: format!("unparseable response body: {e}"),
        })
    }

    /// Lists all configured resources. If the primary endpoint yields no
    /// usable list (some deployments return `resources: null`), retries with
    /// the explicit `format=json` query form.
    pub async fn list_resources(&mut self) -> Result<Vec<Resource>, SchedulerError> {
        match self
            .request_json::<ResourcesEnvelope>(Method::GET, "/Resources/", None)
            .await
        {
            Ok(ResourcesEnvelope { resources: Some(resources) }) => return Ok(resources),
            Ok(_) => debug!("Primary resource listing returned no list, retrying with format=json"),
            Err(e) => debug!("Primary resource listing failed ({e}), retrying with format=json"),
        }

        let envelope: ResourcesEnvelope = self
            .request_json(Method::GET, "/Resources/?format=json", None)
            .await?;

        envelope.resources.ok_or(SchedulerError::Upstream {
            status: StatusCode::OK,
            body: "resource list missing from response".to_string(),
        })
    }

    /// Raw passthrough to the per-resource availability endpoint.
    pub async fn resource_availability(
        &mut self,
        resource_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> Result<Value, SchedulerError> {
        let endpoint = format!(
            "/Resources/{resource_id}/Availability?startDate={start_date}&endDate={end_date}"
        );
        self.request_json(Method::GET, &endpoint, None).await
    }

    /// Per-schedule slot listing. Date arguments must be `YYYY-MM-DD`.
    pub async fn schedule_slots(
        &mut self,
        schedule_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> Result<SlotsEnvelope, SchedulerError> {
        if !DATE_RE.is_match(start_date) || !DATE_RE.is_match(end_date) {
            return Err(SchedulerError::Format(format!(
                "expected YYYY-MM-DD, got startDate: {start_date}, endDate: {end_date}"
            )));
        }

        let endpoint = format!(
            "/Schedules/{schedule_id}/Slots?startDateTime={start_date}&endDateTime={end_date}"
        );
        self.request_json(Method::GET, &endpoint, None).await
    }

    pub async fn create_reservation(
        &mut self,
        request: &CreateReservation,
    ) -> Result<ReservationOutcome, SchedulerError> {
        let body = serde_json::to_value(request).map_err(|e| SchedulerError::Format(e.to_string()))?;
        self.request_json(Method::POST, "/Reservations/", Some(&body))
            .await
    }

    /// Builds a full reservation from simplified form fields. The end time is
    /// the start plus the requested whole-hour duration, both serialized in
    /// local time with a numeric UTC offset suffix (the scheduler rejects
    /// "Z"-suffixed instants).
    pub async fn create_booking(
        &mut self,
        params: BookingParams,
    ) -> Result<ReservationOutcome, SchedulerError> {
        let date = NaiveDate::parse_from_str(&params.date, "%Y-%m-%d")
            .map_err(|_| SchedulerError::Format(format!("invalid date: {}", params.date)))?;
        let time = NaiveTime::parse_from_str(&params.start_time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&params.start_time, "%H:%M"))
            .map_err(|_| SchedulerError::Format(format!("invalid start time: {}", params.start_time)))?;

        let start_naive = date.and_time(time);
        let end_naive = Duration::try_hours(params.duration_hours)
            .and_then(|span| start_naive.checked_add_signed(span))
            .ok_or_else(|| {
                SchedulerError::Format(format!(
                    "invalid duration: {} hours",
                    params.duration_hours
                ))
            })?;

        let format_local = |naive| {
            Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S%z").to_string())
                .ok_or_else(|| SchedulerError::Format(format!("unrepresentable local time: {naive}")))
        };

        self.ensure_authenticated().await?;
        let user_id = self.session.as_ref().map(|s| s.user_id).unwrap_or_default();

        let request = CreateReservation {
            user_id,
            resource_id: params.resource_id,
            title: params.title.unwrap_or_else(|| DEFAULT_BOOKING_TITLE.to_string()),
            description: params.description,
            start_date_time: format_local(start_naive)?,
            end_date_time: format_local(end_naive)?,
            allow_participation: false,
            terms_accepted: true,
            custom_attributes: params.notes.map(|notes| {
                vec![CustomAttribute {
                    attribute_id: NOTES_ATTRIBUTE_ID,
                    attribute_value: notes,
                }]
            }),
        };

        info!(
            resource_id = request.resource_id,
            start = %request.start_date_time,
            end = %request.end_date_time,
            "Creating reservation"
        );

        self.create_reservation(&request).await
    }

    /// Probes every date in the inclusive range against every resource and
    /// collects the dates where at least one resource reports an open slot.
    /// The scheduler has no range/aggregate query, so this is O(days x
    /// resources) sequential calls; a date short-circuits its remaining
    /// resource checks as soon as one hit is found. Per-resource failures are
    /// skipped, not fatal.
    pub async fn check_availability(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<HashSet<String>, SchedulerError> {
        let resources = self.list_resources().await?;

        let mut open_dates = HashSet::new();
        if resources.is_empty() {
            return Ok(open_dates);
        }

        let dates: Vec<String> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect();

        for date in &dates {
            for resource in &resources {
                let availability = match self
                    .resource_availability(resource.resource_id, date, date)
                    .await
                {
                    Ok(value) => value,
                    Err(e) => {
                        debug!(
                            resource_id = resource.resource_id,
                            %date,
                            "Availability probe failed, skipping resource: {e}"
                        );
                        continue;
                    }
                };

                if availability_response_has_open_slot(&availability) {
                    open_dates.insert(date.clone());
                    break;
                }
            }
        }

        Ok(open_dates)
    }

    /// Reservable slots for one day, flattened across all schedules. Queries
    /// once per unique schedule rather than per resource, since resources
    /// share schedules. Slots the scheduler marks non-reservable are dropped
    /// here and never surface.
    pub async fn day_slots(&mut self, date: &str) -> Result<Vec<TimeSlot>, SchedulerError> {
        let resources = self.list_resources().await?;

        if resources.is_empty() {
            return Ok(Vec::new());
        }

        let mut schedule_ids: Vec<i64> = Vec::new();
        for resource in &resources {
            if !schedule_ids.contains(&resource.schedule_id) {
                schedule_ids.push(resource.schedule_id);
            }
        }

        let names: HashMap<i64, &str> = resources
            .iter()
            .map(|r| (r.resource_id, r.name.as_str()))
            .collect();

        let mut slots = Vec::new();

        for schedule_id in schedule_ids {
            let envelope = match self.schedule_slots(schedule_id, date, date).await {
                Ok(envelope) => envelope,
                Err(e) => {
                    warn!(schedule_id, %date, "Slot listing failed, skipping schedule: {e}");
                    continue;
                }
            };

            for day in envelope.dates {
                for resource_slots in day.resources {
                    for raw in resource_slots.slots {
                        if !raw.is_reservable {
                            continue;
                        }
                        slots.push(TimeSlot {
                            resource_id: resource_slots.resource_id,
                            resource_name: names
                                .get(&resource_slots.resource_id)
                                .map(|n| (*n).to_string())
                                .unwrap_or_else(|| "Unknown".to_string()),
                            start_time: clock_time(raw.start_date_time.as_deref()),
                            end_time: clock_time(raw.end_date_time.as_deref()),
                            is_reservable: true,
                        });
                    }
                }
            }
        }

        Ok(slots)
    }
}

/// Scans the raw availability payload (`resources: [[{available: bool}]]`)
/// for any entry marked available.
fn availability_response_has_open_slot(value: &Value) -> bool {
    let Some(resources) = value.get("resources").and_then(Value::as_array) else {
        return false;
    };

    resources.iter().any(|entry| {
        entry.as_array().is_some_and(|items| {
            items
                .iter()
                .any(|item| item.get("available").and_then(Value::as_bool) == Some(true))
        })
    })
}

/// Extracts "HH:MM:SS" from an ISO datetime with a numeric offset, e.g.
/// "2025-12-15T14:00:00-0500" -> "14:00:00". Assumes that fixed layout and
/// yields an empty string when it does not hold.
fn clock_time(datetime: Option<&str>) -> String {
    let Some(datetime) = datetime else {
        return String::new();
    };
    let Some((_, time_part)) = datetime.split_once('T') else {
        return String::new();
    };
    time_part
        .split(['+', '-'])
        .next()
        .unwrap_or("")
        .to_string()
}
