use crate::calendar::Layout;
use crate::models::{CalendarGrid, SelectedOverlay};
use crate::palette::color_for;

const WEEKDAY_LABELS: [&str; 3] = ["Mon", "Wed", "Fri"];

pub fn render_svg(grid: &CalendarGrid, overlays: &[SelectedOverlay]) -> String {
    render_svg_with(grid, overlays, &Layout::default())
}

pub fn render_svg_with(grid: &CalendarGrid, overlays: &[SelectedOverlay], layout: &Layout) -> String {
    let cell = layout.cell_size;
    let mut svg = SVG_HEADER
        .replace("{{WIDTH}}", &layout.width().to_string())
        .replace("{{HEIGHT}}", &layout.height().to_string());

    for (row, label) in WEEKDAY_LABELS.iter().enumerate() {
        let y = layout.top_margin + (row as u32 * 2 + 1) * layout.stride() + 6;
        svg.push_str(&format!("  <text x=\"0\" y=\"{y}\" class=\"label\">{label}</text>\n"));
    }

    for day in &grid.cells {
        let class = if day.is_latest { " class=\"latest-commit\"" } else { "" };
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{cell}\" height=\"{cell}\" fill=\"{}\" stroke=\"#ccc\"{class}/>\n",
            day.x,
            day.y,
            day.color.hex(),
        ));
    }

    for label in &grid.month_labels {
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"10\" class=\"month\">{}</text>\n",
            label.x, label.text
        ));
    }

    for overlay in overlays {
        let (x, y) = (overlay.position.x, overlay.position.y);
        let fill = color_for(overlay.position.count).hex();
        let i = overlay.index;
        let style = format!("animation-delay: {}s", overlay.delay_seconds);

        svg.push_str(&format!(
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{cell}\" height=\"{cell}\" fill=\"{fill}\" stroke=\"#777\" class=\"commit-hole\" id=\"hole-{i}\" style=\"{style}\"/>\n"
        ));
        svg.push_str(&format!(
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{cell}\" height=\"{cell}\" fill=\"{fill}\" stroke=\"#ccc\" class=\"stolen-commit\" id=\"commit-{i}\" style=\"{style}\"/>\n"
        ));
        svg.push_str(&format!(
            "  <g class=\"squirrel\" id=\"animal-{i}\" style=\"{style}\">\n    <text x=\"{}\" y=\"{}\" font-size=\"16\"><title>{}</title>{}</text>\n  </g>\n",
            x + 5,
            y.saturating_sub(2),
            overlay.animal.name,
            overlay.animal.emoji,
        ));
    }

    let latest = grid
        .latest_date
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "none".to_string());
    svg.push_str(&format!(
        "  <text x=\"0\" y=\"{}\" class=\"label\">Latest commit: {latest}</text>\n",
        layout.grid_height() + 15
    ));
    svg.push_str("</svg>\n");
    svg
}

const SVG_HEADER: &str = r#"<svg width="{{WIDTH}}" height="{{HEIGHT}}" xmlns="http://www.w3.org/2000/svg">
  <style>
    .label { font-size: 10px; fill: #555; }
    .month { font-size: 10px; fill: #555; }

    @keyframes fullAnimation {
      0% { opacity: 0; transform: translate(20px, 20px); }
      8% { opacity: 1; transform: translate(0, 0); }
      12% { opacity: 1; transform: translate(0, 0); }
      16% { transform: translate(-5px, -5px); }
      20% { transform: translate(0, 0); }
      28% { transform: translate(-10px, -10px); }
      36% { transform: translate(-50px, -30px); }
      44% { transform: translate(-200px, -100px); opacity: 0; }
      45% { transform: translate(20px, 20px); opacity: 0; }
      60% { opacity: 0; transform: translate(20px, 20px); }
      68% { opacity: 1; transform: translate(0, 0); }
      100% { opacity: 1; transform: translate(0, 0); }
    }

    @keyframes commitAnimation {
      0% { transform: translate(0, 0); }
      12% { transform: translate(0, 0); }
      28% { transform: translate(-8px, -8px); }
      36% { transform: translate(-48px, -28px); }
      44% { transform: translate(-200px, -100px); }
      45% { transform: translate(0, 0); }
      100% { transform: translate(0, 0); }
    }

    @keyframes holeAnimation {
      0% { fill: inherit; stroke-dasharray: none; }
      12% { fill: inherit; stroke-dasharray: none; }
      28% { fill: #ddd; stroke-dasharray: 2,2; }
      44% { fill: white; stroke-dasharray: 2,2; }
      60% { fill: #ddd; stroke-dasharray: 2,2; }
      76% { fill: inherit; stroke-dasharray: none; }
      100% { fill: inherit; stroke-dasharray: none; }
    }

    .squirrel { animation: fullAnimation 25s ease infinite; }
    .stolen-commit { animation: commitAnimation 25s ease infinite; }
    .commit-hole { animation: holeAnimation 25s ease infinite; }
  </style>
"#;
