//! Server-side HTML for the dashboard page.
//!
//! Phases and subcategories are collapsible via small POST forms (`/toggle`);
//! collapsed sections only show their solved/total count.

use crate::util::escape_html;
use crate::view::{DashboardView, PhaseView, SubcategoryView};

const STYLE: &str = "body{font-family:Arial,sans-serif;padding:2rem}\
form{display:inline}\
button.toggle{background:none;border:none;cursor:pointer;font-size:inherit;padding:0}\
.problem{padding:.5rem;margin-bottom:.5rem;border:1px solid #ccc;border-radius:4px}\
.problem.solved{background:#d4edda}\
.problem a{text-decoration:none;color:blue}\
.badge{color:green;font-weight:bold}\
section.sub{margin-left:1.5rem}";

pub fn render_dashboard(view: &DashboardView, username: &str) -> String {
  let mut html = String::with_capacity(4096);
  html.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"><title>Graph Problems</title>");
  html.push_str(&format!("<style>{STYLE}</style></head><body>\n<h1>Graph Problems</h1>\n"));

  html.push_str(&format!(
    "<p>Tracking <strong>{}</strong> \
     <form method=\"post\" action=\"/refresh\"><button type=\"submit\">Refresh solved</button></form></p>\n",
    escape_html(username)
  ));

  if view.loading {
    html.push_str("<p class=\"loading\">Loading…</p>\n</body></html>\n");
    return html;
  }

  if view.solved_loaded {
    html.push_str(&format!("<p class=\"total\">Solved {} problems</p>\n", view.progress));
  } else {
    html.push_str(&format!("<p class=\"total\">Solved problems not loaded yet ({} problems)</p>\n", view.progress.total));
  }

  for phase in &view.phases {
    render_phase(&mut html, phase);
  }
  html.push_str("</body></html>\n");
  html
}

fn render_phase(html: &mut String, phase: &PhaseView) {
  let name = escape_html(&phase.name);
  html.push_str(&format!(
    "<section class=\"phase\"><h2>{}</h2>\n",
    toggle_button(&name, None, phase.expanded, &format!("{name} ({})", phase.progress))
  ));
  if phase.expanded {
    for sub in &phase.subcategories {
      render_subcategory(html, &name, sub);
    }
  }
  html.push_str("</section>\n");
}

fn render_subcategory(html: &mut String, phase_name: &str, sub: &SubcategoryView) {
  let name = escape_html(&sub.name);
  html.push_str(&format!(
    "<section class=\"sub\"><h3>{}</h3>\n",
    toggle_button(phase_name, Some(&name), sub.expanded, &format!("{name} ({})", sub.progress))
  ));
  if sub.expanded {
    for p in &sub.problems {
      let class = if p.solved { "problem solved" } else { "problem" };
      let badge = if p.solved { " <span class=\"badge\">(Solved)</span>" } else { "" };
      html.push_str(&format!(
        "<div class=\"{class}\"><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>{badge}</div>\n",
        escape_html(&p.url),
        escape_html(&p.title)
      ));
    }
  }
  html.push_str("</section>\n");
}

/// Arguments are already escaped.
fn toggle_button(phase: &str, subcategory: Option<&str>, expanded: bool, label: &str) -> String {
  let arrow = if expanded { "▾" } else { "▸" };
  let sub_input = subcategory
    .map(|s| format!("<input type=\"hidden\" name=\"subcategory\" value=\"{s}\">"))
    .unwrap_or_default();
  format!(
    "<form method=\"post\" action=\"/toggle\"><input type=\"hidden\" name=\"phase\" value=\"{phase}\">{sub_input}\
     <button class=\"toggle\" type=\"submit\">{arrow} {label}</button></form>"
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::{Catalog, Phase, Problem, Subcategory};
  use crate::view::{reduce, Event, ExpansionKey, Snapshot};

  fn snapshot() -> Snapshot {
    let catalog = Catalog {
      phases: vec![Phase {
        name: "Phase <1>".into(),
        subcategories: vec![Subcategory {
          name: "BFS & DFS".into(),
          problems: vec![
            Problem { title: "Number of Islands".into(), url: "https://leetcode.com/problems/number-of-islands/".into() },
            Problem { title: "Clone Graph".into(), url: "https://leetcode.com/problems/clone-graph/".into() },
          ],
        }],
      }],
    };
    let s = reduce(&Snapshot::new(false), Event::CatalogLoaded(catalog));
    reduce(&s, Event::SolvedLoaded { seq: 1, solved: ["clone-graph"].into_iter().collect() })
  }

  #[test]
  fn loading_page_when_catalog_unset() {
    let html = render_dashboard(&Snapshot::new(false).dashboard(), "someone");
    assert!(html.contains("Loading…"));
    assert!(html.contains("action=\"/refresh\""));
  }

  #[test]
  fn collapsed_phase_hides_problems_but_shows_counts() {
    let html = render_dashboard(&snapshot().dashboard(), "someone");
    assert!(html.contains("Phase &lt;1&gt; (1/2)"));
    assert!(!html.contains("BFS &amp; DFS"));
    assert!(!html.contains("Clone Graph"));
  }

  #[test]
  fn expanded_sections_mark_solved_problems() {
    let s = reduce(&snapshot(), Event::Toggle(ExpansionKey::Phase("Phase <1>".into())));
    let s = reduce(&s, Event::Toggle(ExpansionKey::Subcategory("Phase <1>".into(), "BFS & DFS".into())));
    let html = render_dashboard(&s.dashboard(), "someone");

    assert!(html.contains("BFS &amp; DFS (1/2)"));
    assert!(html.contains("name=\"subcategory\" value=\"BFS &amp; DFS\""));
    assert!(html.contains("Clone Graph</a> <span class=\"badge\">(Solved)</span>"));
    assert!(!html.contains("Number of Islands</a> <span"));
  }
}
