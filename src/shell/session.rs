//! Command execution against the seeding state.
//!
//! A [`Session`] owns the state container and the selection machine for one shell (or one
//! CLI invocation). [`Session::execute`] turns a parsed [`ShellCommand`] into state
//! mutations and a reply. Bad user input (unknown ids, oversized images, rejected
//! imports) becomes an `Error: ...` reply; only IO failures surface as `Err`.

use super::parser::{ImageArg, ShellCommand, StarchArgs};
use super::render;
use crate::bracket::{SelectionMachine, SlotAction, SlotRef, TOTAL_SLOTS};
use crate::config::Config;
use crate::errors::SeedingError;
use crate::export::{self, ExportFormat, ExportSummary};
use crate::logutil::{describe_image, escape_log};
use crate::pool::StarchDraft;
use crate::state::SeedingState;
use crate::validation::{load_image_data_uri, validate_tournament_name};
use anyhow::{anyhow, Result};
use chrono::Utc;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

pub struct Session {
    state: SeedingState,
    selection: SelectionMachine,
    config: Config,
    finished: bool,
}

impl Session {
    pub fn new(state: SeedingState, config: Config) -> Self {
        Session {
            state,
            selection: SelectionMachine::new(),
            config,
            finished: false,
        }
    }

    pub fn state(&self) -> &SeedingState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SeedingState {
        &mut self.state
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True once QUIT has been executed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run one command and return the text to show.
    pub async fn execute(&mut self, cmd: ShellCommand) -> Result<String> {
        match self.try_execute(cmd).await {
            Ok(reply) => Ok(reply),
            Err(e) => match e.downcast_ref::<SeedingError>() {
                Some(user_error) => {
                    debug!("Command rejected: {}", user_error);
                    Ok(format!("Error: {}\n", user_error))
                }
                None => Err(e),
            },
        }
    }

    /// Like [`Session::execute`], but rejected input is returned as a [`SeedingError`]
    /// inside the error instead of as reply text.
    pub async fn try_execute(&mut self, cmd: ShellCommand) -> Result<String> {
        debug!("Executing {:?}", cmd);
        match cmd {
            ShellCommand::Help => Ok(render::help_text()),
            ShellCommand::Tab(tab) => {
                self.state.set_tab(tab);
                Ok(self.view())
            }
            ShellCommand::Show => Ok(self.view()),
            ShellCommand::Pool { query } => Ok(render::pool_list(&self.state, query.as_deref())),
            ShellCommand::Add(fields) => self.add_starch(fields).await,
            ShellCommand::Edit { id, fields } => self.edit_starch(&id, fields).await,
            ShellCommand::Delete { id, confirmed } => self.delete_starch(&id, confirmed),
            ShellCommand::Pick(id) => self.pick(&id),
            ShellCommand::Slot(slot) => Ok(self.activate_slot(slot)),
            ShellCommand::Drop { id, slot } => self.drop_on(&id, slot),
            ShellCommand::Assign { id, slot } => {
                self.require_starch(&id)?;
                Ok(self.apply(&SlotAction::Assign { slot, starch_id: id }))
            }
            ShellCommand::Remove(slot) => {
                if self.state.grid().is_empty_slot(slot) {
                    return Ok(format!("{} is already empty.\n", slot));
                }
                Ok(self.apply(&SlotAction::Remove { slot }))
            }
            ShellCommand::Cancel => {
                self.selection.cancel();
                Ok("Selection cleared.\n".to_string())
            }
            ShellCommand::Auto => {
                self.selection.cancel();
                let placed = self.state.auto_seed();
                Ok(format!(
                    "Auto-seeded {} starch(es). {}/{} slots filled.\n",
                    placed,
                    self.state.filled_count(),
                    TOTAL_SLOTS
                ))
            }
            ShellCommand::Shuffle => {
                self.selection.cancel();
                let report = self.state.shuffle_seed();
                let mut reply = format!("Shuffled {} starch(es) into the bracket.\n", report.placed);
                if report.left_out > 0 {
                    reply.push_str(&format!(
                        "{} starch(es) did not fit and stay unassigned.\n",
                        report.left_out
                    ));
                }
                Ok(reply)
            }
            ShellCommand::Clear { confirmed } => {
                if !confirmed {
                    return Ok("Clear all seed assignments? Type CLEAR YES to confirm.\n".to_string());
                }
                self.selection.cancel();
                self.state.clear_all();
                Ok("All seed assignments cleared.\n".to_string())
            }
            ShellCommand::Reset { confirmed } => {
                if !confirmed {
                    return Ok(
                        "Reset everything to the default starches and an empty bracket? Type RESET YES to confirm.\n"
                            .to_string(),
                    );
                }
                self.selection.cancel();
                self.state.reset();
                Ok(format!("Reset to defaults ({}).\n", self.state.tournament_name()))
            }
            ShellCommand::Name(name) => {
                let name = validate_tournament_name(&name)?;
                self.state.rename(name);
                Ok(format!("Tournament renamed to {}.\n", self.state.tournament_name()))
            }
            ShellCommand::Export { format, path } => self.export_to(format, path.map(PathBuf::from)).await,
            ShellCommand::Import(path) => self.import_from(Path::new(&path)).await,
            ShellCommand::Status => Ok(render::status_line(&self.state)),
            ShellCommand::Quit => {
                self.finished = true;
                Ok("Goodbye.\n".to_string())
            }
            ShellCommand::Empty => Ok(String::new()),
            ShellCommand::Invalid(usage) => Ok(format!("{}\n", usage)),
            ShellCommand::Unknown(keyword) => Ok(format!(
                "Unknown command '{}'. Type HELP for commands.\n",
                keyword
            )),
        }
    }

    fn view(&self) -> String {
        render::current_view(&self.state, self.selection.state())
    }

    async fn load_image(&self, path: &str) -> Result<String, SeedingError> {
        let uri = load_image_data_uri(Path::new(path), self.config.images.max_upload_bytes).await?;
        debug!("Loaded image {} as {}", path, describe_image(Some(&uri)));
        Ok(uri)
    }

    async fn add_starch(&mut self, fields: StarchArgs) -> Result<String> {
        let image = match &fields.image {
            ImageArg::Load(path) => Some(self.load_image(path).await?),
            ImageArg::Keep | ImageArg::Clear => None,
        };
        let draft = StarchDraft::new(&fields.name, fields.emoji.as_deref(), image)?;
        let id = self.state.add_starch(draft);
        let added = self.state.pool().get(&id).ok_or_else(|| anyhow!("starch {} vanished after add", id))?;
        Ok(format!("Added {}. {} {}\n", added.id, added.glyph(), added.name))
    }

    async fn edit_starch(&mut self, id: &str, fields: StarchArgs) -> Result<String> {
        let current = self
            .state
            .pool()
            .get(id)
            .cloned()
            .ok_or_else(|| SeedingError::UnknownStarch(id.to_string()))?;
        let image = match &fields.image {
            ImageArg::Keep => current.image_url.clone(),
            ImageArg::Clear => None,
            ImageArg::Load(path) => Some(self.load_image(path).await?),
        };
        let emoji = fields.emoji.as_deref().unwrap_or(&current.emoji);
        let draft = StarchDraft::new(&fields.name, Some(emoji), image)?;
        self.state.edit_starch(id, draft);
        Ok(format!("Updated {}.\n", id))
    }

    fn delete_starch(&mut self, id: &str, confirmed: bool) -> Result<String> {
        let starch = self
            .state
            .pool()
            .get(id)
            .ok_or_else(|| SeedingError::UnknownStarch(id.to_string()))?;
        if !confirmed {
            let seeded = match self.state.grid().position_of(id) {
                Some(slot) => format!(" It will also be removed from {}.", slot),
                None => String::new(),
            };
            return Ok(format!(
                "Delete {}?{} Type DELETE {} YES to confirm.\n",
                starch.name, seeded, id
            ));
        }
        let removed = self
            .state
            .delete_starch(id)
            .ok_or_else(|| SeedingError::UnknownStarch(id.to_string()))?;
        self.selection.forget_item(id);
        Ok(format!("Deleted {}.\n", removed.name))
    }

    fn require_starch(&self, id: &str) -> Result<(), SeedingError> {
        if self.state.pool().contains(id) {
            Ok(())
        } else {
            Err(SeedingError::UnknownStarch(id.to_string()))
        }
    }

    fn pick(&mut self, id: &str) -> Result<String> {
        self.require_starch(id)?;
        let assigned = self.state.is_assigned(id);
        if let Some(action) = self.selection.pick_item(id, assigned) {
            return Ok(self.apply(&action));
        }
        Ok(match (self.selection.selected_item(), assigned) {
            (Some(selected), _) => format!(
                "Selected {}. SLOT <region> <seed> to place it.\n",
                self.starch_name(selected)
            ),
            (None, true) => {
                let at = self
                    .state
                    .grid()
                    .position_of(id)
                    .map(|slot| slot.to_string())
                    .unwrap_or_default();
                format!(
                    "{} is already seeded at {}. Choose an empty SLOT first to move it there.\n",
                    self.starch_name(id),
                    at
                )
            }
            (None, false) => "Selection cleared.\n".to_string(),
        })
    }

    fn activate_slot(&mut self, slot: SlotRef) -> String {
        let occupied = !self.state.grid().is_empty_slot(slot);
        match self.selection.activate_slot(slot, occupied) {
            Some(action) => self.apply(&action),
            None => match self.selection.pending_slot() {
                Some(pending) => format!("Choosing a starch for {}. PICK <id> to place one.\n", pending),
                None => "Selection cleared.\n".to_string(),
            },
        }
    }

    fn drop_on(&mut self, id: &str, slot: SlotRef) -> Result<String> {
        self.require_starch(id)?;
        let occupied = !self.state.grid().is_empty_slot(slot);
        match self.selection.drop_on_slot(id, slot, occupied) {
            Some(action) => Ok(self.apply(&action)),
            None => Ok(format!(
                "{} is occupied. Remove it first with SLOT {} {}.\n",
                slot,
                slot.region_name(),
                slot.seed_number()
            )),
        }
    }

    fn starch_name(&self, id: &str) -> String {
        self.state
            .pool()
            .get(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    /// Apply a selection outcome to the state and describe it.
    fn apply(&mut self, action: &SlotAction) -> String {
        let reply = match action {
            SlotAction::Assign { slot, starch_id } => {
                let name = self.starch_name(starch_id);
                match self.state.grid().position_of(starch_id) {
                    Some(from) if from != *slot => format!("Moved {} from {} to {}.\n", name, from, slot),
                    _ => format!("Placed {} at {}.\n", name, slot),
                }
            }
            SlotAction::Remove { slot } => {
                let name = self
                    .state
                    .grid()
                    .get(*slot)
                    .map(|id| self.starch_name(id))
                    .unwrap_or_default();
                format!("Removed {} from {}.\n", name, slot)
            }
        };
        self.state.apply(action);
        reply
    }

    /// Write an export file and return where it went.
    pub async fn export_to(&self, format: ExportFormat, path: Option<PathBuf>) -> Result<String> {
        let content = export::render_export(&self.state, format, Utc::now())
            .map_err(|e| anyhow!("Failed to serialize export: {}", e))?;
        let path = path.unwrap_or_else(|| {
            Path::new(&self.config.storage.export_dir)
                .join(export::export_filename(self.state.tournament_name(), format))
        });
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| anyhow!("Failed to create export directory {:?}: {}", parent, e))?;
        }
        fs::write(&path, content)
            .await
            .map_err(|e| anyhow!("Failed to write export {:?}: {}", path, e))?;
        let summary = ExportSummary::of(&self.state);
        info!("Exported {} bracket to {:?}", format, path);
        Ok(format!(
            "Wrote {} ({}/{} slots, {}).\n",
            path.display(),
            summary.filled_slots,
            summary.total_slots,
            summary.status()
        ))
    }

    async fn import_from(&mut self, path: &Path) -> Result<String> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| SeedingError::UnparseableImport(format!("{}: {}", path.display(), e)))?;
        let imported = match export::parse_import(&text) {
            Ok(imported) => imported,
            Err(e) => {
                warn!("Import of {:?} rejected: {}", path, e);
                return Err(e.into());
            }
        };
        let starches = imported.pool.len();
        if let Some(name) = &imported.name {
            debug!("Import carries tournament name '{}'", escape_log(name));
        }
        self.selection.cancel();
        self.state.replace(imported.pool, imported.grid, imported.name);
        info!("Imported {} starch(es) from {:?}", starches, path);
        Ok(format!(
            "Imported {} starches, {}/{} slots filled.\n",
            starches,
            self.state.filled_count(),
            TOTAL_SLOTS
        ))
    }
}
