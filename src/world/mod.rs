//! The world model: scalars, palette, twin generation grids, and the clock

use crate::config::{self, ResolvedWorld, WorldDefaults};
use crate::error::WorldError;
use crate::life::{self, EdgePolicy, Grid};
use crate::runtime::IntervalTimer;
use crate::Rgba;
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt::Write as _;
use std::path::Path;

/// The central aggregate: everything one simulation run owns.
///
/// `current` is the externally visible generation; `previous` is scratch
/// that only matters during a single `evolve` call. Both always share
/// identical dimensions.
pub struct World {
    pub cell_size: u32,
    pub width: u32,
    pub height: u32,
    pub rows: usize,
    pub columns: usize,
    pub is_grid: bool,
    pub edge: EdgePolicy,
    pub rate: f32,
    pub percent: f32,
    pub generation: u64,
    pub colors: u8,
    pub cell_colors: Vec<Rgba>,
    pub grid_color: Rgba,
    pub bg_color: Rgba,
    pub text_color: Rgba,
    pub current: Grid,
    previous: Grid,
    /// Fires once per generation, period `1 / rate` seconds.
    pub clock: IntervalTimer,
    rng: StdRng,
}

impl World {
    /// Create a world from a config document.
    ///
    /// A missing or malformed document falls back to the built-in defaults
    /// and writes a fresh default document to the same path, so the next
    /// run is reproducible.
    pub fn create<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let defaults = WorldDefaults::default();

        let resolved = match config::load_document(&config_path)
            .and_then(|root| config::resolve(&root, &defaults).map_err(Into::into))
        {
            Ok(resolved) => resolved,
            Err(err) => {
                eprintln!(
                    "warning: {:#}; using built-in defaults for {}",
                    err,
                    config_path.as_ref().display()
                );

                let fallback = config::builtin(&defaults);
                if let Err(write_err) = config::save_document(&config_path, &fallback) {
                    eprintln!("warning: could not write default document: {:#}", write_err);
                }
                fallback
            }
        };

        Self::from_resolved(resolved).context("failed to build world from configuration")
    }

    /// Build a world straight from a resolved document.
    pub fn from_resolved(resolved: ResolvedWorld) -> Result<Self, WorldError> {
        let had_grid = resolved.grid.is_some();
        let current = match resolved.grid {
            Some(grid) => grid,
            None => Grid::new(resolved.rows, resolved.columns)?,
        };
        let previous = Grid::new(resolved.rows, resolved.columns)?;

        let mut world = Self {
            cell_size: resolved.cell_size,
            width: resolved.width,
            height: resolved.height,
            rows: resolved.rows,
            columns: resolved.columns,
            is_grid: resolved.is_grid,
            edge: resolved.edge,
            rate: resolved.rate,
            percent: resolved.percent,
            generation: resolved.generation,
            colors: resolved.colors,
            cell_colors: resolved.cell_colors,
            grid_color: resolved.grid_color,
            bg_color: resolved.bg_color,
            text_color: resolved.text_color,
            current,
            previous,
            clock: IntervalTimer::new(1.0 / resolved.rate),
            rng: StdRng::from_os_rng(),
        };

        // An explicit grid supersedes random seeding.
        if !had_grid && world.percent > 0.0 {
            let count = (world.percent * (world.rows * world.columns) as f32) as usize;
            world.randomize(count)?;
        }

        Ok(world)
    }

    /// Re-populate this world in place from a named document.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let root = config::load_document(&path)?;
        let mut resolved = config::resolve(&root, &WorldDefaults::default())
            .with_context(|| format!("invalid world document: {}", path.as_ref().display()))?;

        // A loaded grid replaces seeding entirely.
        resolved.percent = 0.0;

        *self = Self::from_resolved(resolved)
            .with_context(|| format!("failed to rebuild world from {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Write the full current state, creating the destination directory.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        config::save_document(path, &self.snapshot())
    }

    /// Capture the world as a resolved document for serialization.
    pub fn snapshot(&self) -> ResolvedWorld {
        ResolvedWorld {
            cell_size: self.cell_size,
            width: self.width,
            height: self.height,
            rows: self.rows,
            columns: self.columns,
            percent: self.percent,
            is_grid: self.is_grid,
            edge: self.edge,
            rate: self.rate,
            generation: self.generation,
            colors: self.colors,
            cell_colors: self.cell_colors.clone(),
            grid_color: self.grid_color,
            bg_color: self.bg_color,
            text_color: self.text_color,
            grid: Some(self.current.clone()),
        }
    }

    /// Set `count` uniformly random cells alive, each with a uniformly
    /// random species. Repeats are allowed, so fewer than `count` distinct
    /// cells may end up live.
    pub fn randomize(&mut self, count: usize) -> Result<(), WorldError> {
        for _ in 0..count {
            let row = self.rng.random_range(0..self.rows);
            let column = self.rng.random_range(0..self.columns);
            let species = if self.colors > 1 {
                self.rng.random_range(1..=self.colors)
            } else {
                1
            };
            self.current.set(row, column, species)?;
        }

        Ok(())
    }

    /// Advance exactly one generation.
    pub fn evolve(&mut self) -> Result<(), WorldError> {
        self.current.swap(&mut self.previous)?;
        life::step(
            &self.previous,
            &mut self.current,
            self.edge,
            self.colors,
            &mut self.rng,
        )?;
        self.generation += 1;

        Ok(())
    }

    /// Editor toggle: dead cells come alive with the given species, live
    /// cells die regardless of species.
    pub fn toggle(&mut self, row: usize, column: usize, species: u8) -> Result<(), WorldError> {
        let value = if self.current.get(row, column) == 0 {
            species.clamp(1, self.colors)
        } else {
            0
        };
        self.current.set(row, column, value)
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.current.clear();
    }

    /// Map a pixel position to the cell underneath it.
    pub fn cell_at(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }

        let row = y as usize / self.cell_size as usize;
        let column = x as usize / self.cell_size as usize;
        (row < self.rows && column < self.columns).then_some((row, column))
    }

    /// Reseed the tie-break and seeding RNG for reproducible runs.
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Human-readable settings summary.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<12}: {}", "cell size", self.cell_size);
        let _ = writeln!(out, "{:<12}: {}x{}", "viewport", self.width, self.height);
        let _ = writeln!(out, "{:<12}: {}x{}", "cells", self.rows, self.columns);
        let _ = writeln!(out, "{:<12}: {}", "grid lines", if self.is_grid { "yes" } else { "no" });
        let _ = writeln!(out, "{:<12}: {:?} ({})", "edges", self.edge, self.edge.code());
        let _ = writeln!(out, "{:<12}: {} gen/s", "rate", self.rate);
        let _ = writeln!(out, "{:<12}: {}", "species", self.colors);
        let _ = writeln!(out, "{:<12}: {}", "generation", self.generation);
        let _ = writeln!(out, "{:<12}: {}", "live cells", self.current.live_count());
        out
    }
}
