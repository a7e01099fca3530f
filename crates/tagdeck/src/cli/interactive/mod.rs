//! Interactive tagging session in the terminal.
//!
//! Shows the image under the cursor with its tags and offers a menu for
//! navigation, tag management and import/export. Every menu action goes
//! through the core [`Session`]; rejected operations print an error and the
//! session keeps running.

pub mod theme;

use console::Style;
use dialoguer::{Confirm, Input, MultiSelect, Select};
use std::path::PathBuf;
use tagdeck_core::config::expand_path;
use tagdeck_core::{Config, ImageDiscovery, OutputFormat, Session, TagReport};

use theme::{print_error, print_success, tagdeck_theme};

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Menu entries, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Previous,
    EditTags,
    AddTag,
    DeleteTag,
    RenameTag,
    Jump,
    OpenFolder,
    Import,
    Export,
    Counts,
    Quit,
}

impl Action {
    const ALL: [Action; 12] = [
        Action::Next,
        Action::Previous,
        Action::EditTags,
        Action::AddTag,
        Action::DeleteTag,
        Action::RenameTag,
        Action::Jump,
        Action::OpenFolder,
        Action::Import,
        Action::Export,
        Action::Counts,
        Action::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Action::Next => "Next image",
            Action::Previous => "Previous image",
            Action::EditTags => "Edit tags of this image",
            Action::AddTag => "Add tag",
            Action::DeleteTag => "Delete tag",
            Action::RenameTag => "Rename tag",
            Action::Jump => "Go to image #",
            Action::OpenFolder => "Open another folder",
            Action::Import => "Import associations",
            Action::Export => "Export associations",
            Action::Counts => "Show tag counts",
            Action::Quit => "Quit",
        }
    }
}

/// Checkbox items for the current image: `name (count)` labels and their
/// checked state, in registry order.
fn tag_items(session: &Session) -> (Vec<String>, Vec<bool>) {
    let current = session.current_tags();
    session
        .tags()
        .iter()
        .map(|tag| {
            (
                format!("{} ({})", tag.name(), tag.count()),
                current.contains(tag.name()),
            )
        })
        .unzip()
}

/// Move to the 1-based image `number`; 0 and numbers past the end are errors.
fn jump_to_number(session: &mut Session, number: usize) -> anyhow::Result<()> {
    let Some(index) = number.checked_sub(1) else {
        anyhow::bail!(
            "Image number must be between 1 and {}",
            session.images().len()
        );
    };
    session.jump(index)?;
    Ok(())
}

/// Apply a checkbox selection to the current image.
///
/// The full set of checked tags replaces the image's tags.
fn apply_selection(session: &mut Session, selected: &[usize]) -> anyhow::Result<()> {
    let names: Vec<String> = session.registry().names().map(String::from).collect();
    let checked = selected.iter().filter_map(|&i| names.get(i).cloned());
    session.set_current_tags(checked)?;
    Ok(())
}

/// Driver state for one interactive run.
struct TaggingUi<'a> {
    session: Session,
    config: &'a Config,
    export_path: Option<PathBuf>,
    dirty: bool,
}

/// Entry point for the interactive tagging session.
pub fn run(session: Session, config: &Config, export_path: Option<PathBuf>) -> anyhow::Result<()> {
    theme::print_banner();

    let mut ui = TaggingUi {
        session,
        config,
        export_path,
        dirty: false,
    };
    let theme = tagdeck_theme();
    let items: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    let mut last = 0;

    loop {
        ui.print_status();

        let selection = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&items)
            .default(last)
            .interact_opt()?;

        let Some(index) = selection else {
            // Esc / Ctrl+C behaves like Quit
            if ui.confirm_quit()? {
                break;
            }
            continue;
        };
        last = index;

        let action = Action::ALL[index];
        if action == Action::Quit {
            if ui.confirm_quit()? {
                break;
            }
            continue;
        }
        if let Err(e) = ui.perform(action) {
            print_error(e);
        }
    }

    Ok(())
}

impl TaggingUi<'_> {
    fn perform(&mut self, action: Action) -> anyhow::Result<()> {
        match action {
            Action::Next => {
                self.session.next();
            }
            Action::Previous => {
                self.session.previous();
            }
            Action::EditTags => self.edit_tags()?,
            Action::AddTag => self.add_tag()?,
            Action::DeleteTag => self.delete_tag()?,
            Action::RenameTag => self.rename_tag()?,
            Action::Jump => self.jump()?,
            Action::OpenFolder => self.open_folder()?,
            Action::Import => self.import()?,
            Action::Export => self.export()?,
            Action::Counts => {
                eprintln!();
                TagReport::from_session(&self.session)
                    .write_to(std::io::stderr().lock(), OutputFormat::Table)?;
            }
            Action::Quit => {}
        }
        Ok(())
    }

    fn print_status(&self) {
        let dim = Style::new().for_stderr().dim();
        let cyan = Style::new().for_stderr().cyan();
        let bold = Style::new().for_stderr().bold();

        eprintln!();
        match (self.session.position_label(), self.session.current_image()) {
            (Some(position), Some(image)) => {
                eprintln!("  {}  {}", cyan.apply_to(position), bold.apply_to(image));
                let tags = self.session.current_tags();
                let applied = if tags.is_empty() {
                    "(no tags)".to_string()
                } else {
                    tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
                };
                eprintln!("  {}", dim.apply_to(applied));
            }
            _ => eprintln!("  {}", dim.apply_to("No images loaded")),
        }
        if self.dirty {
            eprintln!("  {}", dim.apply_to("(unsaved changes)"));
        }
        eprintln!();
    }

    fn edit_tags(&mut self) -> anyhow::Result<()> {
        if self.session.registry().is_empty() {
            anyhow::bail!("No tags yet. Add one first.");
        }
        let (items, checked) = tag_items(&self.session);
        let Some(selected) = MultiSelect::with_theme(&tagdeck_theme())
            .with_prompt("Tags (space to toggle, enter to apply)")
            .items(&items)
            .defaults(&checked)
            .interact_opt()?
        else {
            return Ok(());
        };
        apply_selection(&mut self.session, &selected)?;
        self.dirty = true;
        Ok(())
    }

    fn add_tag(&mut self) -> anyhow::Result<()> {
        let Some(name) = handle_interrupt(
            Input::<String>::with_theme(&tagdeck_theme())
                .with_prompt("New tag")
                .allow_empty(true)
                .interact_text(),
        )?
        else {
            return Ok(());
        };
        if self.session.add_tag(&name)? {
            print_success(format!("Added '{}'", name.trim()));
        } else if !name.trim().is_empty() {
            print_error(format!("Tag '{}' already exists", name.trim()));
        }
        Ok(())
    }

    /// Pick a registered tag. `None` on cancel.
    fn pick_tag(&self, prompt: &str) -> anyhow::Result<Option<String>> {
        let names: Vec<String> = self.session.registry().names().map(String::from).collect();
        if names.is_empty() {
            anyhow::bail!("No tags to choose from");
        }
        let index = Select::with_theme(&tagdeck_theme())
            .with_prompt(prompt)
            .items(&names)
            .default(0)
            .interact_opt()?;
        Ok(index.map(|i| names[i].clone()))
    }

    fn delete_tag(&mut self) -> anyhow::Result<()> {
        let Some(name) = self.pick_tag("Delete which tag?")? else {
            return Ok(());
        };
        let count = self.session.registry().get(&name).map_or(0, |t| t.count());
        let confirmed = Confirm::with_theme(&tagdeck_theme())
            .with_prompt(format!("Delete '{name}' and remove it from {count} image(s)?"))
            .default(false)
            .interact_opt()?
            .unwrap_or(false);
        if confirmed {
            self.session.delete_tag(&name)?;
            self.dirty = true;
            print_success(format!("Deleted '{name}'"));
        }
        Ok(())
    }

    fn rename_tag(&mut self) -> anyhow::Result<()> {
        let Some(old) = self.pick_tag("Rename which tag?")? else {
            return Ok(());
        };
        let Some(new) = handle_interrupt(
            Input::<String>::with_theme(&tagdeck_theme())
                .with_prompt("New name")
                .with_initial_text(old.clone())
                .interact_text(),
        )?
        else {
            return Ok(());
        };
        self.session.rename_tag(&old, &new)?;
        self.dirty = true;
        Ok(())
    }

    fn jump(&mut self) -> anyhow::Result<()> {
        let total = self.session.images().len();
        if total == 0 {
            anyhow::bail!("No images loaded");
        }
        let Some(number) = handle_interrupt(
            Input::<usize>::with_theme(&tagdeck_theme())
                .with_prompt(format!("Image number (1-{total})"))
                .interact_text(),
        )?
        else {
            return Ok(());
        };
        jump_to_number(&mut self.session, number)
    }

    fn prompt_path(&self, prompt: &str, default: Option<&PathBuf>) -> anyhow::Result<Option<PathBuf>> {
        let theme = tagdeck_theme();
        let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string_lossy().into_owned());
        }
        Ok(handle_interrupt(input.interact_text())?.map(|raw| expand_path(&raw)))
    }

    fn open_folder(&mut self) -> anyhow::Result<()> {
        let Some(folder) = self.prompt_path("Folder", None)? else {
            return Ok(());
        };
        if !folder.is_dir() {
            anyhow::bail!("Not a folder: {}", folder.display());
        }
        let images = ImageDiscovery::new(self.config.discovery.clone()).discover(&folder);
        self.session.load_images(&images);
        print_success(format!("Loaded {} image(s)", images.len()));
        Ok(())
    }

    fn import(&mut self) -> anyhow::Result<()> {
        let default = self.export_path.clone();
        let Some(path) = self.prompt_path("Import from", default.as_ref())? else {
            return Ok(());
        };
        if self.dirty {
            let proceed = Confirm::with_theme(&tagdeck_theme())
                .with_prompt("Importing replaces all current associations. Continue?")
                .default(false)
                .interact_opt()?
                .unwrap_or(false);
            if !proceed {
                return Ok(());
            }
        }
        let rows = self.session.import_from_path(&path)?;
        self.dirty = false;
        print_success(format!("Imported {rows} image(s)"));
        Ok(())
    }

    fn export(&mut self) -> anyhow::Result<()> {
        let default = self.export_path.clone();
        let Some(path) = self.prompt_path("Export to", default.as_ref())? else {
            return Ok(());
        };
        let rows = self.session.export_to_path(&path)?;
        self.export_path = Some(path);
        self.dirty = false;
        print_success(format!("Exported {rows} image(s)"));
        Ok(())
    }

    /// Offer to export unsaved changes. Returns false to stay in the session.
    fn confirm_quit(&mut self) -> anyhow::Result<bool> {
        if !self.dirty {
            return Ok(true);
        }
        let choice = Select::with_theme(&tagdeck_theme())
            .with_prompt("Unsaved changes")
            .items(&["Export and quit", "Quit without exporting", "Cancel"])
            .default(0)
            .interact_opt()?;
        match choice {
            Some(0) => match self.export() {
                Ok(()) => Ok(!self.dirty),
                Err(e) => {
                    print_error(e);
                    Ok(false)
                }
            },
            Some(1) => Ok(true),
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let mut session = Session::default();
        session.load_images(&[PathBuf::from("a.png"), PathBuf::from("b.png")]);
        session.add_tag("cat").unwrap();
        session.add_tag("dog").unwrap();
        session.add_tag("bird").unwrap();
        session
    }

    #[test]
    fn test_action_labels_unique() {
        let mut labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), Action::ALL.len());
        assert_eq!(Action::ALL.last(), Some(&Action::Quit));
    }

    #[test]
    fn test_tag_items_reflect_current_image() {
        let mut session = session();
        session.set_current_tags(["dog"]).unwrap();

        let (items, checked) = tag_items(&session);
        assert_eq!(items, vec!["cat (0)", "dog (1)", "bird (0)"]);
        assert_eq!(checked, vec![false, true, false]);
    }

    #[test]
    fn test_apply_selection_replaces_tags() {
        let mut session = session();
        session.set_current_tags(["dog"]).unwrap();

        apply_selection(&mut session, &[0, 2]).unwrap();

        let tags: Vec<String> = session.current_tags().into_iter().collect();
        assert_eq!(tags, vec!["cat", "bird"]);
        assert_eq!(session.registry().get("dog").unwrap().count(), 0);
    }

    #[test]
    fn test_jump_to_number_is_one_based() {
        let mut session = session();
        jump_to_number(&mut session, 2).unwrap();
        assert_eq!(session.current_image(), Some("b.png"));

        assert!(jump_to_number(&mut session, 0).is_err());
        assert!(jump_to_number(&mut session, 3).is_err());
        assert_eq!(session.current_image(), Some("b.png"));
    }

    #[test]
    fn test_apply_selection_ignores_stale_indices() {
        let mut session = session();
        apply_selection(&mut session, &[1, 9]).unwrap();
        let tags: Vec<String> = session.current_tags().into_iter().collect();
        assert_eq!(tags, vec!["dog"]);
    }
}
