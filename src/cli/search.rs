use crate::{
    cli::{open_session, sets::print_set},
    error,
    gemini::GeminiClient,
    retrieval::{self, SEARCH_FAILED_MESSAGE, SearchOutcome},
    success, utils, warning,
};

pub async fn search(set_number: String) {
    let fetcher = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(e) => error!("Cannot search without the generative service. Err: {}", e),
    };

    let mut session = open_session().await;

    let pb = utils::spinner(&format!("Scanning inventory of set {}...", set_number.trim()));
    let outcome = retrieval::search(&mut session, &fetcher, &set_number).await;
    pb.finish_and_clear();

    match outcome {
        SearchOutcome::Added(set_id) => {
            if let Some(set) = session.state().find_set(&set_id) {
                success!(
                    "Added set {} {} with {} part types.",
                    set.number,
                    set.name,
                    set.parts.len()
                );
                print_set(set);
            }
        }
        SearchOutcome::Failed => {
            let message = session
                .state()
                .error
                .clone()
                .unwrap_or_else(|| SEARCH_FAILED_MESSAGE.to_string());
            warning!("{}", message);
        }
        SearchOutcome::AlreadySearching => {
            warning!("A search is already running, try again when it has finished.")
        }
    }
}
