//! Plain-text rendering of aggregator rows.


use lotlist_core::{LotRow, ServerNotice};

const FAVORITE_MARK: &str = "*";

/// One line per row: favorite mark, name, free count, load, detail.
pub(crate) fn table(rows: &[LotRow]) -> String {
    if rows.is_empty() {
        return "no matching lots\n".to_owned();
    }
    let name_width = rows
        .iter()
        .map(|r| r.record.name.chars().count())
        .max()
        .unwrap_or(0);
    let free_width = rows.iter().map(|r| r.free.len()).max().unwrap_or(0);

    let mut out = String::new();
    for row in rows {
        let mark = if row.is_favorite { FAVORITE_MARK } else { " " };
        let line = format!(
            "{mark} {name:<name_width$}  {free:>free_width$}  {load}  {detail}",
            name = row.record.name,
            free = row.free,
            load = row.load,
            detail = row.detail,
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

pub(crate) fn notice(notice: &ServerNotice) -> String {
    match (notice.title.is_empty(), notice.message.is_empty()) {
        (false, false) => format!("{}: {}", notice.title, notice.message),
        (true, _) => notice.message.clone(),
        (false, true) => notice.title.clone(),
    }
}
