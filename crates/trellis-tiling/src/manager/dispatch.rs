use tracing::debug;
use trellis_common::types::FrameId;

use super::{Result, TilingManager};
use crate::commands::TilingCommand;
use crate::platform::Context;

impl TilingManager {
    /// Run a user command against the focused frame and render the result.
    pub fn execute(&mut self, ctx: &Context<'_>, command: TilingCommand) -> Result<()> {
        debug!(?command, "executing");
        match command {
            TilingCommand::MoveFocused(direction) => {
                let Some(frame) = self.focused else {
                    return Ok(());
                };
                if self.move_frame(frame, direction)? {
                    self.render_frame_workspace(ctx, frame)?;
                }
            }
            TilingCommand::FocusDirection(direction) => {
                self.focus_direction(ctx, direction)?;
            }
            TilingCommand::Resize(direction, steps) => {
                let Some(frame) = self.focused else {
                    return Ok(());
                };
                let step = i32::try_from(self.config.resize_step).unwrap_or(i32::MAX);
                if self.resize(frame, direction, steps.saturating_mul(step))? {
                    self.render_frame_workspace(ctx, frame)?;
                }
            }
            TilingCommand::SwitchWorkspace(id) => self.switch_workspace(ctx, id)?,
            TilingCommand::MoveFocusedToWorkspace(id) => {
                let Some(frame) = self.focused else {
                    return Ok(());
                };
                self.move_frame_to_workspace(ctx, frame, id)?;
            }
        }
        Ok(())
    }

    fn render_frame_workspace(&mut self, ctx: &Context<'_>, frame: FrameId) -> Result<()> {
        match self.workspace_of(frame) {
            Some(workspace) => self.render_workspace(ctx, workspace),
            None => Ok(()),
        }
    }
}
