//! Pre-renders the site into a directory that any static file host can serve:
//! one list page per slide and window (`index.html`, `all/`, `slides/<k>/`,
//! `slides/<k>/all/`), one `events/<id>/index.html` per event, `404.html`,
//! and a copy of the static asset directory.
//!
//! Exported list pages have no search form since free-text queries cannot be
//! pre-rendered; their carousel and "See More" links point at the other
//! exported list pages.

use std::fs;
use std::path::{Component, Path, PathBuf};

use askama::Template;
use explorer_core::{EventDataset, FilterState, Slide};
use tracing::{debug, info};

use crate::error::{Result, WebError};
use crate::models::{static_page_dir, LinkStyle, PageLinks};
use crate::templates::{EventDetailTemplate, IndexTemplate, NotFoundTemplate};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub pages: usize,
    pub assets: usize,
}

pub fn export_site(
    dataset: &EventDataset,
    slides: &[Slide],
    static_dir: &Path,
    out: &Path,
) -> Result<ExportSummary> {
    info!(out = %out.display(), events = dataset.len(), "Exporting static site");
    // Check every id before anything is written.
    let event_dirs = dataset
        .events()
        .iter()
        .map(|event| event_dir(out, &event.id))
        .collect::<Result<Vec<_>>>()?;

    fs::create_dir_all(out)?;
    let mut summary = ExportSummary::default();

    for slide in 0..slides.len().max(1) {
        for show_all in [false, true] {
            let links = PageLinks {
                style: LinkStyle::Static,
                slide,
                show_all,
            };
            let state = FilterState::new().with_show_all(show_all);
            let page = IndexTemplate::build(dataset, slides, &state, links, None)?;
            let dir = out.join(static_page_dir(slide, show_all));
            fs::create_dir_all(&dir)?;
            write_page(&dir.join("index.html"), &page.render()?)?;
            summary.pages += 1;
        }
    }

    for (event, dir) in dataset.events().iter().zip(event_dirs) {
        fs::create_dir_all(&dir)?;
        let page = EventDetailTemplate {
            event: event.clone(),
        };
        write_page(&dir.join("index.html"), &page.render()?)?;
        summary.pages += 1;
    }

    let not_found = NotFoundTemplate::for_path("this address");
    write_page(&out.join("404.html"), &not_found.render()?)?;
    summary.pages += 1;

    if static_dir.is_dir() {
        summary.assets += copy_dir(static_dir, &out.join("static"))?;
        // Pages reference the placeholder at the site root.
        let placeholder = static_dir.join("placeholder.svg");
        if placeholder.is_file() {
            fs::copy(&placeholder, out.join("placeholder.svg"))?;
            summary.assets += 1;
        }
    } else {
        debug!(dir = %static_dir.display(), "No static directory to copy");
    }

    info!(pages = summary.pages, assets = summary.assets, "Export complete");
    Ok(summary)
}

/// `events/<id>` under `out`. The id must be a single plain path component.
fn event_dir(out: &Path, id: &str) -> Result<PathBuf> {
    let mut components = Path::new(id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == id => Ok(out.join("events").join(name)),
        _ => Err(WebError::UnsafeEventId(id.to_string())),
    }
}

fn write_page(path: &Path, html: &str) -> Result<()> {
    fs::write(path, html)?;
    debug!(path = %path.display(), "Wrote page");
    Ok(())
}

fn copy_dir(from: &Path, to: &Path) -> Result<usize> {
    fs::create_dir_all(to)?;
    let mut copied = 0;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
