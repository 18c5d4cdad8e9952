use tracing::debug;

use axura_shared::{UserId, UserPatch, UserRecord};

use crate::cli::UsersArgs;
use crate::error::{ClientError, Result};
use crate::source::UserSource;
use crate::table::UserTable;
use crate::view::{page_count, DerivedPage, ViewParameters};

/// Load the table, apply the listing flags and render the requested page.
pub async fn list_users(source: &impl UserSource, args: &UsersArgs) -> Result<String> {
    let mut table = UserTable::load(source).await?;

    for id in &args.remove {
        if !table.remove_by_id(&UserId::from(id.as_str())) {
            debug!(id = %id, "Nothing to hide");
        }
    }

    let params = table.params_mut();
    params
        .set_page_size(args.page_size)
        .map_err(|e| ClientError::InvalidInput(e.to_string()))?;
    params.set_filter_tab(args.tab);
    params.set_search_query(args.search.clone().unwrap_or_default());
    params.set_sort(args.sort, args.order);
    params.set_page(args.page);

    Ok(render_page(&table.view(), table.params()))
}

pub async fn show_user(source: &impl UserSource, id: &str) -> Result<String> {
    let user = source.fetch_one(&UserId::from(id)).await?;
    Ok(render_user(&user))
}

pub async fn update_user(source: &impl UserSource, id: &str, patch: UserPatch) -> Result<String> {
    if patch.is_empty() {
        return Err(ClientError::InvalidInput(
            "nothing to update, pass --name, --email or --status".into(),
        ));
    }
    let user = source.update(&UserId::from(id), &patch).await?;
    Ok(render_user(&user))
}

fn render_user(user: &UserRecord) -> String {
    format!(
        "id:     {}\nname:   {}\nemail:  {}\nstatus: {}",
        user.id, user.name, user.email, user.subscription_status
    )
}

/// Text table for one derived page, followed by a position footer.
pub fn render_page(page: &DerivedPage, params: &ViewParameters) -> String {
    if page.total_matching == 0 {
        return "No users found".to_string();
    }

    let pages = page_count(page.total_matching, params.page_size());
    if page.rows.is_empty() {
        return format!(
            "Page {} is past the end ({} matching, {pages} page(s))",
            params.page_index() + 1,
            page.total_matching
        );
    }

    let headers = ["ID", "NAME", "EMAIL", "STATUS"];
    let rows: Vec<[&str; 4]> = page
        .rows
        .iter()
        .map(|u| {
            [
                u.id.as_str(),
                u.name.as_str(),
                u.email.as_str(),
                u.subscription_status.label(),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines: Vec<String> = std::iter::once(&headers)
        .chain(rows.iter())
        .map(|row| {
            row.iter()
                .zip(widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect();

    let first = params.page_index() * params.page_size() + 1;
    let last = first + page.rows.len() - 1;
    lines.push(format!(
        "{first}-{last} of {} (page {}/{pages})",
        page.total_matching,
        params.page_index() + 1
    ));
    lines.join("\n")
}
