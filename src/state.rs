use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::MailingListService;
use crate::infra::email::octopus::OctopusMailingList;

/// Shared per-process state. Note there is no scheduler client here: every
/// inbound request builds its own client and session (see the scheduler
/// module), so nothing session-shaped is ever shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub mailing_list: Arc<dyn MailingListService>,
}

pub fn bootstrap_state(config: &Config) -> AppState {
    let mailing_list = Arc::new(OctopusMailingList::new(
        config.octopus_api_base.clone(),
        config.octopus_api_key.clone(),
        config.octopus_list_id.clone(),
    ));

    AppState {
        config: config.clone(),
        mailing_list,
    }
}
