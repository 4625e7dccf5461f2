#![forbid(unsafe_code)]

//! The query surface shared by [`Paragraph`](crate::Paragraph) and
//! [`Line`](crate::Line).

use std::borrow::Cow;
use std::cell::OnceCell;

use fbidi_core::{BidiError, Result};

use crate::model::{Direction, Level, LevelView};
use crate::paragraph::ReorderOptions;
use crate::run::{LogicalRun, RunList, VisualRun};
use crate::writer::WriteOptions;
use crate::{mapping, reorder, writer};

/// Run, mapping and output queries over text with resolved levels.
///
/// Implementors supply a [`LevelView`] and a cache cell; the run list is
/// computed on the first query that needs it and reused afterwards.
pub trait Reordering {
    /// Borrowed levels, classes and text.
    fn view(&self) -> LevelView<'_>;

    /// Storage for the lazily computed run list.
    fn run_cache(&self) -> &OnceCell<RunList>;

    fn runs(&self) -> Result<&RunList> {
        if let Some(runs) = self.run_cache().get() {
            return Ok(runs);
        }
        let runs = reorder::compute_runs(&self.view())?;
        Ok(self.run_cache().get_or_init(|| runs))
    }

    fn len(&self) -> usize {
        self.view().len()
    }

    fn is_empty(&self) -> bool {
        self.view().is_empty()
    }

    fn text(&self) -> &[char] {
        self.view().text()
    }

    fn direction(&self) -> Direction {
        self.view().direction()
    }

    fn para_level(&self) -> Level {
        self.view().para_level()
    }

    fn options(&self) -> ReorderOptions {
        self.view().options
    }

    fn level_at(&self, index: usize) -> Result<Level> {
        self.view().level_at(index)
    }

    fn levels(&self) -> Cow<'_, [Level]> {
        self.view().levels()
    }

    fn count_runs(&self) -> Result<usize> {
        Ok(self.runs()?.len())
    }

    /// Direction, logical start and length of the run at visual position
    /// `run_index`.
    fn visual_run(&self, run_index: usize) -> Result<VisualRun> {
        let runs = self.runs()?;
        let run = runs.get(run_index).ok_or_else(|| {
            BidiError::illegal(format!("run index {run_index} out of range 0..{}", runs.len()))
        })?;
        Ok(VisualRun {
            direction: run.direction(),
            logical_start: run.logical_start(),
            length: runs.run_length(run_index),
        })
    }

    /// The run containing logical position `pos`.
    fn logical_run(&self, pos: usize) -> Result<LogicalRun> {
        let view = self.view();
        view.check_index(pos, "logical position")?;
        let runs = self.runs()?;
        let run_index = runs
            .find_logical(pos)
            .ok_or(BidiError::InvalidState("logical position outside every run"))?;
        let run = &runs.as_slice()[run_index];
        Ok(LogicalRun {
            run_index,
            logical_limit: run.logical_start() + runs.run_length(run_index),
            level: view.level_at(pos)?,
        })
    }

    /// Length of the reordered output.
    fn result_length(&self) -> Result<usize> {
        Ok(mapping::result_length(&self.view(), self.runs()?))
    }

    fn logical_to_visual(&self, logical: usize) -> Result<Option<usize>> {
        mapping::logical_to_visual(&self.view(), self.runs()?, logical)
    }

    fn visual_to_logical(&self, visual: usize) -> Result<Option<usize>> {
        mapping::visual_to_logical(&self.view(), self.runs()?, visual)
    }

    fn logical_map(&self) -> Result<Vec<Option<usize>>> {
        mapping::logical_map(&self.view(), self.runs()?)
    }

    fn visual_map(&self) -> Result<Vec<Option<usize>>> {
        mapping::visual_map(&self.view(), self.runs()?)
    }

    /// Copy the logical map into `dest`, returning the text length.
    fn fill_logical_map(&self, dest: &mut [Option<usize>]) -> Result<usize> {
        fill(dest, self.logical_map()?)
    }

    /// Copy the visual map into `dest`, returning the result length.
    fn fill_visual_map(&self, dest: &mut [Option<usize>]) -> Result<usize> {
        fill(dest, self.visual_map()?)
    }

    fn write_reordered(&self, options: WriteOptions) -> Result<String> {
        Ok(writer::write_reordered(&self.view(), self.runs()?, options))
    }

    /// Write into `dest`, or report the capacity required.
    fn write_reordered_into(&self, dest: &mut [char], options: WriteOptions) -> Result<usize> {
        writer::write_reordered_into(&self.view(), self.runs()?, dest, options)
    }
}

fn fill(dest: &mut [Option<usize>], map: Vec<Option<usize>>) -> Result<usize> {
    if dest.len() < map.len() {
        return Err(BidiError::BufferOverflow { required: map.len() });
    }
    dest[..map.len()].copy_from_slice(&map);
    Ok(map.len())
}
