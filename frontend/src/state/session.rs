use chrono::NaiveDate;
use chrono_tz::Tz;
use leptos::*;
use serde::Deserialize;

use crate::api::ApiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkMode {
    #[default]
    Unset,
    Wfo,
    Wfh,
}

impl WorkMode {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "WFO" | "OFFICE" => Self::Wfo,
            "WFH" => Self::Wfh,
            _ => Self::Unset,
        }
    }

    /// Selecting the active mode again clears it.
    pub fn toggled(self, clicked: WorkMode) -> WorkMode {
        if self == clicked {
            Self::Unset
        } else {
            clicked
        }
    }

    /// Mode string sent with check-in and check-out.
    pub fn clock_mode(self) -> &'static str {
        match self {
            Self::Wfh => "WFH",
            _ => "Office",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Wfo => "WFO",
            Self::Wfh => "WFH",
            Self::Unset => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: Option<String>,
    pub access_token: Option<String>,
    pub work_mode: WorkMode,
    pub time_zone: Tz,
    pub doj: Option<NaiveDate>,
    pub probation_months: Option<u32>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user_id: None,
            access_token: None,
            work_mode: WorkMode::Unset,
            time_zone: Tz::UTC,
            doj: None,
            probation_months: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSeed {
    #[serde(default, alias = "_id", alias = "id")]
    user_id: Option<String>,
    #[serde(default, alias = "token")]
    access_token: Option<String>,
    #[serde(default)]
    work_mode: Option<String>,
    #[serde(default)]
    time_zone: Option<String>,
    #[serde(default)]
    doj: Option<String>,
    #[serde(default)]
    probation_months: Option<u32>,
}

impl Session {
    /// Builds a session from the JSON the hosting shell publishes.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let seed: SessionSeed = serde_json::from_str(raw)?;
        Ok(Self::from_seed(seed))
    }

    fn from_seed(seed: SessionSeed) -> Self {
        let time_zone = match seed.time_zone.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.parse::<Tz>().unwrap_or_else(|_| {
                log::warn!("Unknown time zone {:?}, falling back to UTC", name);
                Tz::UTC
            }),
            _ => Tz::UTC,
        };
        Self {
            user_id: non_blank(seed.user_id),
            access_token: non_blank(seed.access_token),
            work_mode: seed
                .work_mode
                .as_deref()
                .map(WorkMode::parse)
                .unwrap_or_default(),
            time_zone,
            doj: seed
                .doj
                .as_deref()
                .and_then(crate::utils::time::parse_flexible_date),
            probation_months: seed.probation_months,
        }
    }

    /// Reads `window.__HRDESK_SESSION`; absent or malformed globals yield an
    /// anonymous session.
    pub fn from_window() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let Ok(value) = js_sys::Reflect::get(&window, &"__HRDESK_SESSION".into()) else {
            return Self::default();
        };
        if value.is_undefined() || value.is_null() {
            log::info!("No session published by the host page");
            return Self::default();
        }
        let raw = match value.as_string() {
            Some(raw) => raw,
            None => match js_sys::JSON::stringify(&value).ok().and_then(|s| s.as_string()) {
                Some(raw) => raw,
                None => return Self::default(),
            },
        };
        Self::from_json(&raw).unwrap_or_else(|err| {
            log::warn!("Ignoring malformed session: {}", err);
            Self::default()
        })
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new().with_access_token(self.access_token.clone())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Session plus the counter that tells leave views to reload.
#[derive(Clone, Copy)]
pub struct SessionContext {
    pub session: RwSignal<Session>,
    pub leave_refresh: RwSignal<u32>,
}

impl SessionContext {
    pub fn user_id(&self) -> Option<String> {
        self.session.with(|session| session.user_id.clone())
    }

    pub fn time_zone(&self) -> Tz {
        self.session.with(|session| session.time_zone)
    }

    pub fn work_mode(&self) -> WorkMode {
        self.session.with(|session| session.work_mode)
    }

    pub fn toggle_work_mode(&self, clicked: WorkMode) {
        self.session
            .update(|session| session.work_mode = session.work_mode.toggled(clicked));
    }

    pub fn bump_leave_refresh(&self) {
        self.leave_refresh.update(|value| *value = value.wrapping_add(1));
    }
}

pub fn provide_session(session: Session) -> SessionContext {
    let ctx = SessionContext {
        session: create_rw_signal(session),
        leave_refresh: create_rw_signal(0),
    };
    provide_context(ctx);
    ctx
}

pub fn use_session() -> SessionContext {
    match use_context::<SessionContext>() {
        Some(ctx) => ctx,
        None => provide_session(Session::default()),
    }
}
