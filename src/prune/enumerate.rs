use tracing::debug;

use crate::error::{PruneError, Result};
use crate::tfe::{TeamToken, TeamTokenApi, TeamTokenListOptions};

/// Fetch every team token in `organization`, in server order.
///
/// Stops once the reported current page reaches the total page count. Any
/// failed page aborts the walk and drops what was already fetched.
pub fn list_all_team_tokens<A: TeamTokenApi + ?Sized>(
    api: &A,
    organization: &str,
    team_query: Option<&str>,
) -> Result<Vec<TeamToken>> {
    let mut options = TeamTokenListOptions {
        page_number: Some(1),
        query: team_query.map(str::to_string),
        ..TeamTokenListOptions::default()
    };

    let mut tokens = Vec::new();
    loop {
        let page = api
            .list_team_tokens(organization, &options)
            .map_err(|err| PruneError::ListTokens {
                organization: organization.to_string(),
                source: Box::new(err),
            })?;
        debug!(
            organization,
            page = page.pagination.current_page,
            total_pages = page.pagination.total_pages,
            items = page.items.len(),
            "fetched team token page"
        );
        tokens.extend(page.items);

        if page.pagination.is_last() {
            break;
        }

        let next = page
            .pagination
            .next_page
            .unwrap_or(page.pagination.current_page + 1);
        options.page_number = Some(next);
    }

    Ok(tokens)
}
