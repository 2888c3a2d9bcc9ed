//! Snapshot post-processing driver.
//!
//! One subcommand per recurring analysis: plane maps, axial profiles,
//! aperture peak scans, particle angular momentum and energy spectra,
//! all over EPOCH-style `.npz` snapshot archives.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use pic_reduce::aperture::{aperture_profile, circular_mask};
use pic_reduce::bound::{AxisBound, Region};
use pic_reduce::particles::angular_momentum_x;
use pic_reduce::reduce::{reduce, restrict, Reduced, Reduction};
use pic_reduce::spectrum::merge_bins;
use pic_report::heatmap::render_heatmap;
use pic_report::line::{render_profile, render_profile_pair, render_spectrum};
use pic_report::peaks::{scan_peaks, write_peak_csv};
use pic_report::style::PlotStyle;
use pic_snapshot::archive::Snapshot;
use pic_snapshot::distfn::load_spectrum;
use pic_snapshot::fields::{load_component, load_density, load_energy, load_grid, load_variable};
use pic_snapshot::particles::load_particles;
use pic_snapshot::series::FrameSeries;
use pic_types::config::ApertureConfig;
use pic_types::constants::{CRITICAL_DENSITY_M3, MEV_J};
use pic_types::error::PicError;
use pic_types::species::{DistChannel, FieldComponent, Species};
use pic_types::state::Axis3;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "picpost",
    version,
    about = "Range reductions and figures for EPOCH-style PIC snapshots"
)]
struct Cli {
    /// More log output on stderr (repeatable).
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all log output.
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Heatmap of a density plane in x and y.
    DensityMap {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Slice coordinate along z [um]; 3D snapshots default to the
        /// middle of the axis.
        #[arg(long, allow_negative_numbers = true)]
        z_slice: Option<f64>,

        /// Keep only x inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        x_range: Option<Vec<f64>>,

        /// Keep only y inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        y_range: Option<Vec<f64>>,

        /// Output image path.
        #[arg(short, long, default_value = "density_map.png")]
        out: PathBuf,
    },

    /// Heatmap of a 3D density in the transverse y-z plane, either
    /// sliced at an x coordinate or summed over an x range.
    TransverseMap {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Slice coordinate along x [um].
        #[arg(long, allow_negative_numbers = true)]
        x_pos: Option<f64>,

        /// Sum over x inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        x_range: Option<Vec<f64>>,

        /// Keep only y inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        y_range: Option<Vec<f64>>,

        /// Keep only z inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        z_range: Option<Vec<f64>>,

        /// Output image path.
        #[arg(short, long, default_value = "transverse_map.png")]
        out: PathBuf,
    },

    /// Line plot of a 3D density summed over y and z per x slab.
    DensityProfile {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Keep only x inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        x_range: Option<Vec<f64>>,

        /// Keep only y inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        y_range: Option<Vec<f64>>,

        /// Keep only z inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        z_range: Option<Vec<f64>>,

        /// Output image path.
        #[arg(short, long, default_value = "density_profile.png")]
        out: PathBuf,
    },

    /// Heatmap of one E or B field component in x and y.
    FieldMap {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Field component: Ex, Ey, Ez, Bx, By or Bz.
        #[arg(long)]
        component: String,

        /// Slice coordinate along z [um]; 3D snapshots default to the
        /// middle of the axis.
        #[arg(long, allow_negative_numbers = true)]
        z_slice: Option<f64>,

        /// Keep only x inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        x_range: Option<Vec<f64>>,

        /// Keep only y inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        y_range: Option<Vec<f64>>,

        /// Output image path.
        #[arg(short, long, default_value = "field_map.png")]
        out: PathBuf,
    },

    /// Mean and variance of the average particle energy over a region.
    EnergyStats {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Keep only x inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        x_range: Option<Vec<f64>>,

        /// Keep only y inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        y_range: Option<Vec<f64>>,

        /// Keep only z inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        z_range: Option<Vec<f64>>,
    },

    /// Weighted angular momentum about x of the tracked particle
    /// subset inside a position window.
    AngularMomentum {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Keep only particles with x inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        x_range: Option<Vec<f64>>,

        /// Keep only particles with y inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        y_range: Option<Vec<f64>>,

        /// Keep only particles with z inside [MIN, MAX] [um].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"], allow_negative_numbers = true)]
        z_range: Option<Vec<f64>>,
    },

    /// Circular-aperture density and energy-density profiles along x
    /// with a peak scan over configured windows; writes a CSV and a
    /// two-panel figure.
    AperturePeaks {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Aperture scan configuration (JSON).
        #[arg(short, long)]
        config: String,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Directory for the CSV and figure.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Energy spectrum of one snapshot with bin merging, drawn on a
    /// logarithmic count axis.
    Spectrum {
        /// Snapshot archive (.npz).
        snapshot: PathBuf,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Distribution channel: allenergy0 or en.
        #[arg(long, default_value = "allenergy0")]
        channel: String,

        /// Consecutive raw bins per merged bin.
        #[arg(long, default_value_t = 5)]
        merge: usize,

        /// Drawn energy range [MIN, MAX] in MeV.
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
        energy_range: Option<Vec<f64>>,

        /// Drawn dN/dE range [MIN, MAX].
        #[arg(long, num_args = 2, value_names = ["MIN", "MAX"])]
        density_range: Option<Vec<f64>>,

        /// Output image path.
        #[arg(short, long, default_value = "spectrum.png")]
        out: PathBuf,
    },

    /// Per-frame spectra over a dump series; missing frames are
    /// skipped and the energy axis comes from the first frame found.
    SpectrumSeries {
        /// Directory holding the dump series.
        dir: PathBuf,

        /// Dump file prefix.
        #[arg(long, default_value = "distfun")]
        prefix: String,

        /// Dump file suffix.
        #[arg(long, default_value = ".npz")]
        suffix: String,

        /// First frame index.
        #[arg(long, default_value_t = 1)]
        start: u32,

        /// Last frame index, inclusive.
        #[arg(long, default_value_t = 80)]
        end: u32,

        /// Particle species (photon or electron).
        #[arg(long, default_value = "photon")]
        species: String,

        /// Distribution channel: allenergy0 or en.
        #[arg(long, default_value = "en")]
        channel: String,

        /// Consecutive raw bins per merged bin.
        #[arg(long, default_value_t = 1)]
        merge: usize,

        /// Directory for the per-frame images.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Stem of the per-frame image names.
        #[arg(long, default_value = "spectrum")]
        stem: String,
    },
}

fn logging_init(verbosity: u8, quiet: bool) {
    stderrlog::new()
        .modules(vec![
            module_path!(),
            "pic_snapshot",
            "pic_reduce",
            "pic_report",
        ])
        .quiet(quiet)
        .verbosity(verbosity as usize)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .unwrap();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging_init(cli.verbose + 2, cli.quiet);
    run(cli.command)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::DensityMap {
            snapshot,
            species,
            z_slice,
            x_range,
            y_range,
            out,
        } => density_map(snapshot, &species, z_slice, x_range, y_range, out),
        Command::TransverseMap {
            snapshot,
            species,
            x_pos,
            x_range,
            y_range,
            z_range,
            out,
        } => transverse_map(snapshot, &species, x_pos, x_range, y_range, z_range, out),
        Command::DensityProfile {
            snapshot,
            species,
            x_range,
            y_range,
            z_range,
            out,
        } => density_profile(snapshot, &species, x_range, y_range, z_range, out),
        Command::FieldMap {
            snapshot,
            component,
            z_slice,
            x_range,
            y_range,
            out,
        } => field_map(snapshot, &component, z_slice, x_range, y_range, out),
        Command::EnergyStats {
            snapshot,
            species,
            x_range,
            y_range,
            z_range,
        } => energy_stats(snapshot, &species, x_range, y_range, z_range),
        Command::AngularMomentum {
            snapshot,
            species,
            x_range,
            y_range,
            z_range,
        } => angular_momentum(snapshot, &species, x_range, y_range, z_range),
        Command::AperturePeaks {
            snapshot,
            config,
            species,
            out_dir,
        } => aperture_peaks(snapshot, &config, &species, out_dir),
        Command::Spectrum {
            snapshot,
            species,
            channel,
            merge,
            energy_range,
            density_range,
            out,
        } => spectrum_single(
            snapshot,
            &species,
            &channel,
            merge,
            energy_range,
            density_range,
            out,
        ),
        Command::SpectrumSeries {
            dir,
            prefix,
            suffix,
            start,
            end,
            species,
            channel,
            merge,
            out_dir,
            stem,
        } => spectrum_series(
            dir, &prefix, &suffix, start, end, &species, &channel, merge, out_dir, &stem,
        ),
    }
}

/// Inclusive axis bound from a `--*-range MIN MAX` pair.
fn bound_from(range: Option<Vec<f64>>) -> Result<Option<AxisBound>> {
    match range {
        None => Ok(None),
        Some(pair) => Ok(Some(AxisBound::new(pair[0], pair[1])?)),
    }
}

fn range_pair(range: Option<Vec<f64>>) -> Option<(f64, f64)> {
    range.map(|pair| (pair[0], pair[1]))
}

fn density_map(
    snapshot: PathBuf,
    species: &str,
    z_slice: Option<f64>,
    x_range: Option<Vec<f64>>,
    y_range: Option<Vec<f64>>,
    out: PathBuf,
) -> Result<()> {
    let species = Species::parse(species)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let grid = load_grid(&mut snap)?;
    let field = load_density(&mut snap, species, &grid)?;
    let region = Region {
        x: bound_from(x_range)?,
        y: bound_from(y_range)?,
        z: None,
    };
    let title = format!("{species} density (n/n_c)");
    let style = PlotStyle::density();

    if grid.is_volume() || z_slice.is_some() {
        let mode = Reduction::Slice {
            axis: Axis3::Z,
            target: z_slice,
        };
        match reduce(&field, &grid, &region, &mode)? {
            Reduced::Plane {
                coords,
                values,
                collapse,
                ..
            } => {
                if let Some(c) = collapse {
                    info!("sliced z at index {} (z = {:.3} um)", c.index, c.coord);
                }
                render_heatmap(
                    &out, &coords.0, &coords.1, &values, &style, &title, "x (um)", "y (um)",
                )?;
            }
            other => bail!("density map reduced to {other:?} instead of a plane"),
        }
    } else {
        let (flat, sub) = restrict(&field, &grid, &region)?;
        render_heatmap(
            &out,
            &sub.x,
            &sub.y,
            flat.as_plane()?,
            &style,
            &title,
            "x (um)",
            "y (um)",
        )?;
    }
    info!("wrote '{}'", out.display());
    Ok(())
}

fn transverse_map(
    snapshot: PathBuf,
    species: &str,
    x_pos: Option<f64>,
    x_range: Option<Vec<f64>>,
    y_range: Option<Vec<f64>>,
    z_range: Option<Vec<f64>>,
    out: PathBuf,
) -> Result<()> {
    let species = Species::parse(species)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let grid = load_grid(&mut snap)?;
    grid.require_z()?;
    let field = load_density(&mut snap, species, &grid)?;
    let region = Region {
        x: bound_from(x_range)?,
        y: bound_from(y_range)?,
        z: bound_from(z_range)?,
    };
    // A slice target together with an x range is rejected by the
    // engine as conflicting.
    let mode = match (x_pos, region.x) {
        (None, None) => bail!("one of --x-pos or --x-range is required"),
        (None, Some(_)) => Reduction::Sum {
            axes: vec![Axis3::X],
        },
        (Some(target), _) => Reduction::Slice {
            axis: Axis3::X,
            target: Some(target),
        },
    };

    match reduce(&field, &grid, &region, &mode)? {
        Reduced::Plane {
            coords,
            values,
            collapse,
            ..
        } => {
            if let Some(c) = collapse {
                info!("sliced x at index {} (x = {:.3} um)", c.index, c.coord);
            }
            render_heatmap(
                &out,
                &coords.0,
                &coords.1,
                &values,
                &PlotStyle::density(),
                &format!("transverse {species} density (n/n_c)"),
                "y (um)",
                "z (um)",
            )?;
        }
        other => bail!("transverse map reduced to {other:?} instead of a plane"),
    }
    info!("wrote '{}'", out.display());
    Ok(())
}

fn density_profile(
    snapshot: PathBuf,
    species: &str,
    x_range: Option<Vec<f64>>,
    y_range: Option<Vec<f64>>,
    z_range: Option<Vec<f64>>,
    out: PathBuf,
) -> Result<()> {
    let species = Species::parse(species)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let grid = load_grid(&mut snap)?;
    grid.require_z()?;
    let field = load_density(&mut snap, species, &grid)?;
    let region = Region {
        x: bound_from(x_range)?,
        y: bound_from(y_range)?,
        z: bound_from(z_range)?,
    };
    let mode = Reduction::Sum {
        axes: vec![Axis3::Y, Axis3::Z],
    };

    match reduce(&field, &grid, &region, &mode)? {
        Reduced::Profile { coord, values, .. } => {
            render_profile(
                &out,
                &coord,
                &values,
                &PlotStyle::density(),
                &format!("{species} density along x"),
                "x (um)",
                "summed n/n_c",
            )?;
        }
        other => bail!("density profile reduced to {other:?} instead of a profile"),
    }
    info!("wrote '{}'", out.display());
    Ok(())
}

fn field_map(
    snapshot: PathBuf,
    component: &str,
    z_slice: Option<f64>,
    x_range: Option<Vec<f64>>,
    y_range: Option<Vec<f64>>,
    out: PathBuf,
) -> Result<()> {
    let component = FieldComponent::parse(component)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let grid = load_grid(&mut snap)?;
    let field = load_component(&mut snap, component, &grid)?;
    let region = Region {
        x: bound_from(x_range)?,
        y: bound_from(y_range)?,
        z: None,
    };
    let title = format!("{component} field");
    let style = PlotStyle::diverging();

    if grid.is_volume() || z_slice.is_some() {
        let mode = Reduction::Slice {
            axis: Axis3::Z,
            target: z_slice,
        };
        match reduce(&field, &grid, &region, &mode)? {
            Reduced::Plane {
                coords,
                values,
                collapse,
                ..
            } => {
                if let Some(c) = collapse {
                    info!("sliced z at index {} (z = {:.3} um)", c.index, c.coord);
                }
                render_heatmap(
                    &out, &coords.0, &coords.1, &values, &style, &title, "x (um)", "y (um)",
                )?;
            }
            other => bail!("field map reduced to {other:?} instead of a plane"),
        }
    } else {
        let (flat, sub) = restrict(&field, &grid, &region)?;
        render_heatmap(
            &out,
            &sub.x,
            &sub.y,
            flat.as_plane()?,
            &style,
            &title,
            "x (um)",
            "y (um)",
        )?;
    }
    info!("wrote '{}'", out.display());
    Ok(())
}

fn energy_stats(
    snapshot: PathBuf,
    species: &str,
    x_range: Option<Vec<f64>>,
    y_range: Option<Vec<f64>>,
    z_range: Option<Vec<f64>>,
) -> Result<()> {
    let species = Species::parse(species)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let grid = load_grid(&mut snap)?;
    let field = load_energy(&mut snap, species, &grid)?;
    let region = Region {
        x: bound_from(x_range)?,
        y: bound_from(y_range)?,
        z: bound_from(z_range)?,
    };

    match reduce(&field, &grid, &region, &Reduction::Stats)? {
        Reduced::Stats(stats) => {
            println!("cells: {}", stats.count);
            println!(
                "mean energy: {:.6e} J ({:.4} MeV)",
                stats.mean,
                stats.mean / MEV_J
            );
            println!("energy variance: {:.6e} J^2", stats.variance);
        }
        other => bail!("energy stats reduced to {other:?}"),
    }
    Ok(())
}

fn angular_momentum(
    snapshot: PathBuf,
    species: &str,
    x_range: Option<Vec<f64>>,
    y_range: Option<Vec<f64>>,
    z_range: Option<Vec<f64>>,
) -> Result<()> {
    let species = Species::parse(species)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let set = load_particles(&mut snap, species)?;
    info!("{} particles in the tracked {species} subset", set.len());
    let region = Region {
        x: bound_from(x_range)?,
        y: bound_from(y_range)?,
        z: bound_from(z_range)?,
    };

    let summary = angular_momentum_x(&set, &region)?;
    println!("selected particles: {}", summary.selected);
    println!("total Lx: {:.6e}", summary.total);
    println!("weighted mean Lx: {:.6e}", summary.mean);
    println!("max weighted Lx: {:.6e}", summary.max);
    println!("min weighted Lx: {:.6e}", summary.min);
    Ok(())
}

fn aperture_peaks(
    snapshot: PathBuf,
    config: &str,
    species: &str,
    out_dir: PathBuf,
) -> Result<()> {
    let species = Species::parse(species)?;
    let cfg = ApertureConfig::from_file(config)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let grid = load_grid(&mut snap)?;
    let z = grid.require_z()?;

    // The density profile is normalised; the energy-density profile
    // multiplies the raw density by the cell-averaged energy.
    let raw = load_variable(&mut snap, &species.density_key(), &grid)?;
    let raw = raw.as_volume()?;
    let energy = load_energy(&mut snap, species, &grid)?;
    let energy = energy.as_volume()?;
    let density = raw.mapv(|n| n / CRITICAL_DENSITY_M3);
    let energy_density = raw * energy;

    let mask = circular_mask(&grid.y, z, cfg.radius_um);
    let density_profile = aperture_profile(&density, &mask)?;
    let energy_profile = aperture_profile(&energy_density, &mask)?;

    let mut windows = Vec::with_capacity(cfg.windows.len());
    for w in &cfg.windows {
        windows.push(AxisBound::new(w[0], w[1])?);
    }
    let rows = scan_peaks(&grid.x, &density_profile, &energy_profile, &windows)?;

    let csv_path = out_dir.join(format!("{}_peaks.csv", cfg.output_stem));
    write_peak_csv(&csv_path, &rows)?;
    info!("wrote '{}'", csv_path.display());

    let png_path = out_dir.join(format!("{}_profiles.png", cfg.output_stem));
    render_profile_pair(
        &png_path,
        &grid.x,
        &density_profile,
        "n (n_c)",
        &energy_profile,
        "n E (arb. units)",
        &PlotStyle::density(),
        &format!("{species} aperture scan, r = {} um", cfg.radius_um),
        "x (um)",
    )?;
    info!("wrote '{}'", png_path.display());
    Ok(())
}

fn spectrum_single(
    snapshot: PathBuf,
    species: &str,
    channel: &str,
    merge: usize,
    energy_range: Option<Vec<f64>>,
    density_range: Option<Vec<f64>>,
    out: PathBuf,
) -> Result<()> {
    let species = Species::parse(species)?;
    let channel = DistChannel::parse(channel)?;
    let mut snap = Snapshot::open(&snapshot)?;
    let raw = load_spectrum(&mut snap, species, channel)?;
    let merged = merge_bins(&raw.energy_mev, &raw.counts, merge)?;
    info!(
        "merged {} raw bins into {} of {:.4} MeV",
        raw.energy_mev.len(),
        merged.energy_mev.len(),
        merged.bin_width_mev
    );

    let e_range = range_pair(energy_range).unwrap_or((1.0, 100.0));
    render_spectrum(
        &out,
        &merged.energy_mev,
        &merged.density,
        &PlotStyle::density(),
        &format!("{species} energy spectrum"),
        Some(e_range),
        range_pair(density_range),
    )?;
    info!("wrote '{}'", out.display());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn spectrum_series(
    dir: PathBuf,
    prefix: &str,
    suffix: &str,
    start: u32,
    end: u32,
    species: &str,
    channel: &str,
    merge: usize,
    out_dir: PathBuf,
    stem: &str,
) -> Result<()> {
    let species = Species::parse(species)?;
    let channel = DistChannel::parse(channel)?;
    if start > end {
        bail!("frame range {start}..={end} is empty");
    }
    let series = FrameSeries::new(&dir, prefix, suffix);

    // Common energy axis from the first dump that exists, so every
    // frame draws over the same abscissa.
    let mut first_range = None;
    for index in start..=end {
        if let Some(mut snap) = series.try_open(index)? {
            let raw = load_spectrum(&mut snap, species, channel)?;
            let merged = merge_bins(&raw.energy_mev, &raw.counts, merge)?;
            let last = merged.energy_mev.len() - 1;
            info!(
                "energy axis from frame {index}: {:.3} to {:.3} MeV",
                merged.energy_mev[0], merged.energy_mev[last]
            );
            first_range = Some((merged.energy_mev[0], merged.energy_mev[last]));
            break;
        }
    }
    let e_range = match first_range {
        Some(range) => range,
        None => bail!(
            "no frames between {start} and {end} under '{}'",
            dir.display()
        ),
    };

    let mut written = 0usize;
    for index in start..=end {
        let mut snap = match series.try_open(index)? {
            Some(snap) => snap,
            None => continue,
        };
        let raw = load_spectrum(&mut snap, species, channel)?;
        let merged = merge_bins(&raw.energy_mev, &raw.counts, merge)?;
        let path = out_dir.join(format!("{stem}{index:04}.png"));
        match render_spectrum(
            &path,
            &merged.energy_mev,
            &merged.density,
            &PlotStyle::density(),
            &format!("{species} spectrum, frame {index}"),
            Some(e_range),
            Some((1e0, 1e12)),
        ) {
            Ok(()) => {
                info!("frame {index} -> '{}'", path.display());
                written += 1;
            }
            // A frame with no counts yet has nothing to put on a log
            // axis; skip it like a missing dump.
            Err(PicError::EmptySelection(detail)) => {
                warn!("frame {index} skipped: {detail}");
            }
            Err(e) => return Err(e.into()),
        }
    }
    info!("{written} spectra written to '{}'", out_dir.display());
    Ok(())
}
