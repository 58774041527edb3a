use scout_core::{AppViewModel, Post, ResultRowView, ScrapePhase};

const PROGRESS_BAR_WIDTH: usize = 24;
const CAPTION_WIDTH: usize = 40;

pub fn render_status(view: &AppViewModel) -> String {
    let phase_label = match view.phase {
        ScrapePhase::Idle => "Idle",
        ScrapePhase::Running => "Running",
        ScrapePhase::Finished => "Finished",
        ScrapePhase::Aborted => "Aborted",
    };
    let source = if view.source_url.is_empty() {
        "<no source url>"
    } else {
        view.source_url.as_str()
    };

    format!(
        "{} {:>5.1}% | {} | Results: {} | {}",
        progress_bar(view.progress, PROGRESS_BAR_WIDTH),
        view.progress_percent(),
        phase_label,
        view.result_count,
        source
    )
}

pub fn progress_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn render_table(view: &AppViewModel) -> Vec<String> {
    if view.rows.is_empty() {
        return vec!["No results.".to_string()];
    }
    view.rows.iter().map(render_row).collect()
}

fn render_row(row: &ResultRowView) -> String {
    format!(
        "{:>3}. {:<16} {:<20} {}  {}",
        row.index,
        row.phone_number,
        row.name.as_deref().unwrap_or("-"),
        truncate(&row.caption, CAPTION_WIDTH),
        row.uri
    )
}

pub fn render_post(post: &Post) -> Vec<String> {
    let mut lines = vec![format!("== {} ==", post.caption), post.uri.clone()];
    if let Some(price) = &post.price {
        lines.push(format!("Price: {price}"));
    }
    if let Some(phone) = &post.phone_number {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(published) = &post.published_at {
        lines.push(format!("Published: {published}"));
    }
    if let Some(description) = &post.description {
        lines.push(String::new());
        lines.extend(description.lines().map(str::to_string));
    }
    if !post.image_uris.is_empty() {
        lines.push(format!("Images: {}", post.image_uris.len()));
        lines.extend(post.image_uris.iter().map(|uri| format!("  {uri}")));
    }
    lines
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}
