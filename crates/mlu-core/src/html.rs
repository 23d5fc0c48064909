//! HTML layout for rows of pre-rendered blocks.

/// Lay out rows of HTML blocks as flex rows inside a single container.
pub fn html_blocks_to_grid<R, S>(blocks: &[R]) -> String
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let rows: Vec<String> = blocks
        .iter()
        .map(|row| {
            let cells: String = row.as_ref().iter().map(|b| b.as_ref()).collect();
            format!("<div style='display:flex; justify-content:left;'>{}</div>", cells)
        })
        .collect();

    format!("<div>{}</div>", rows.join("\n"))
}
