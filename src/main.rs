// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/*! Print the expected-fluorescence report for one parameter set.

Every physical input is a command-line option whose default is the value
from the Sm:SrF2 worked example, so running the program bare reproduces
the lab numbers. `--dump-spectrum` writes the intermediate spectral arrays
as tab-separated blocks (one block per frequency axis, blank-line
separated) for plotting with external tools.

*/

extern crate clap;
#[macro_use] extern crate slog;
extern crate slog_async;
extern crate slog_term;
extern crate smfluor;

use clap::{arg, command, value_parser, ArgAction};
use slog::{Drain, Level, Logger};
use std::error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::process;

use smfluor::units;
use smfluor::{BeamParameters, CrystalComposition, FluorescenceModel, LinewidthSet, SpectrumArrays, PI, TWO_PI};


fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn error::Error>> {
    let matches = command!()
        .about("Expected fluorescence of a laser-driven Sm:SrF2 crystal")
        .arg(arg!(--"frequency-thz" <THZ> "Laser carrier frequency, THz")
             .value_parser(value_parser!(f64)).default_value("438.035").required(false))
        .arg(arg!(--"power-mw" <MW> "Beam peak power, mW")
             .value_parser(value_parser!(f64)).default_value("190").required(false))
        .arg(arg!(--"half-width-x-cm" <CM> "Beam half-width along x, cm")
             .value_parser(value_parser!(f64)).default_value("0.054").required(false))
        .arg(arg!(--"half-width-y-cm" <CM> "Beam half-width along y, cm")
             .value_parser(value_parser!(f64)).default_value("0.026").required(false))
        .arg(arg!(--"laser-linewidth-hz" <HZ> "Laser spectral FWHM, Hz")
             .value_parser(value_parser!(f64)).default_value("300").required(false))
        .arg(arg!(--"excited-linewidth-hz" <HZ> "Excited-state radiative FWHM, Hz")
             .value_parser(value_parser!(f64)).default_value("13").required(false))
        .arg(arg!(--"homogeneous-linewidth-hz" <HZ> "Assumed homogeneous FWHM, Hz")
             .value_parser(value_parser!(f64)).default_value("130000").required(false))
        .arg(arg!(--"inhomogeneous-linewidth-ghz" <GHZ> "Inhomogeneous FWHM, GHz")
             .value_parser(value_parser!(f64)).default_value("30").required(false))
        .arg(arg!(--"cross-section-cm2" <CM2> "Peak absorption cross section, cm^2")
             .value_parser(value_parser!(f64)).default_value("4.7e-19").required(false))
        .arg(arg!(--"detuning-hz" <HZ> "Offset of the inhomogeneous center from the carrier, Hz")
             .value_parser(value_parser!(f64)).default_value("0").required(false))
        .arg(arg!(--"efficiency" <ETA> "Photon detection efficiency, (0, 1]")
             .value_parser(value_parser!(f64)).default_value("0.005").required(false))
        .arg(arg!(--"dopant-fraction" <F> "Sm ions per SrF2 formula unit")
             .value_parser(value_parser!(f64)).default_value("8.3e-5").required(false))
        .arg(arg!(--"crystal-length-cm" <CM> "Illuminated crystal length, cm")
             .value_parser(value_parser!(f64)).default_value("1.0").required(false))
        .arg(arg!(--"atom-count" <N> "Resonant ion count; overrides the crystal derivation")
             .value_parser(value_parser!(f64)).required(false))
        .arg(arg!(--"resolution" <N> "Grid samples across the broader linewidth")
             .value_parser(value_parser!(usize)).default_value("100001").required(false))
        .arg(arg!(--"dump-spectrum" <PATH> "Write the intermediate spectral arrays as TSV")
             .required(false))
        .arg(arg!(-v --verbose ... "Raise the logging level (-v debug, -vv trace)")
             .action(ArgAction::Count))
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::Info,
        1 => Level::Debug,
        _ => Level::Trace,
    };
    let log = terminal_log(level);

    let frequency_thz = *matches.get_one::<f64>("frequency-thz").unwrap();
    let excited_hz = *matches.get_one::<f64>("excited-linewidth-hz").unwrap();

    let beam = BeamParameters::new(
        frequency_thz * units::TERAHERTZ,
        *matches.get_one::<f64>("power-mw").unwrap() * units::MILLIWATT,
        *matches.get_one::<f64>("half-width-x-cm").unwrap(),
        *matches.get_one::<f64>("half-width-y-cm").unwrap(),
    )?;

    let linewidths = LinewidthSet::new(
        TWO_PI * *matches.get_one::<f64>("laser-linewidth-hz").unwrap(),
        TWO_PI * excited_hz,
        TWO_PI * *matches.get_one::<f64>("homogeneous-linewidth-hz").unwrap(),
        TWO_PI * *matches.get_one::<f64>("inhomogeneous-linewidth-ghz").unwrap() * units::GIGAHERTZ,
    )?;

    let atom_count = match matches.get_one::<f64>("atom-count") {
        Some(&n) => n,
        None => {
            let crystal = CrystalComposition::sm_srf2(
                *matches.get_one::<f64>("dopant-fraction").unwrap(),
            )?;
            crystal.check(&log);

            let length = *matches.get_one::<f64>("crystal-length-cm").unwrap();
            let n = crystal.resonant_atom_count(PI * beam.waist() * beam.waist(), length);

            debug!(log, "derived atom count from crystal composition";
                   "count" => n, "length_cm" => length);
            n
        }
    };

    let model = FluorescenceModel::new(beam, linewidths)
        .cross_section(*matches.get_one::<f64>("cross-section-cm2").unwrap())
        .atom_count(atom_count)
        .inhomogeneous_offset(TWO_PI * *matches.get_one::<f64>("detuning-hz").unwrap())
        .detection_efficiency(*matches.get_one::<f64>("efficiency").unwrap())
        .resolution(*matches.get_one::<usize>("resolution").unwrap());

    // When a dump is requested, reuse the same pipeline run for the
    // report rather than convolving twice.
    let r = match matches.get_one::<String>("dump-spectrum") {
        Some(path) => {
            let (r, s) = model.compute_full(&log)?;
            dump_spectrum(&s, path)?;
            info!(log, "wrote spectral arrays"; "path" => path);
            r
        }
        None => model.compute(&log)?,
    };
    let gamma_ex = TWO_PI * excited_hz;

    println!("beam waist:                       {:.5} cm", r.waist);
    println!("carrier frequency:                {:.3} THz", frequency_thz);
    println!("wavelength:                       {:.2} nm", r.wavelength / units::NANOMETER);
    println!("intensity:                        {:.0} mW/cm^2", r.intensity / units::MILLIWATT);
    println!("photon flux:                      {:.4e} cm^-2 s^-1", r.photon_flux);
    println!("stimulated rate, flat spectrum:   {:.4} Gamma_Ex", r.flat_rate / gamma_ex);
    println!("stimulated rate, convolved peak:  {:.4} Gamma_Ex", r.peak_rate / gamma_ex);
    println!("peak fraction excited:            {:.4}", r.peak_excitation);
    println!("peak Rabi frequency:              {:.1} Hz", r.rabi_frequency);
    println!("total fluorescence rate:          {:.4e} s^-1", r.scattering_rate);
    println!("sampled population fraction:      {:.3e}", r.sampled_fraction);
    println!("expected photocurrent:            {:.1} pA", r.photocurrent / units::PICOAMP);

    Ok(())
}


fn terminal_log(level: Level) -> Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    Logger::root(drain, o!())
}


/// Write the spectral arrays as tab-separated blocks, one per axis, with a
/// comment header naming the columns and blank lines between blocks so
/// that gnuplot's `index` selector can pick them apart.
fn dump_spectrum(s: &SpectrumArrays, path: &str) -> Result<(), Box<dyn error::Error>> {
    let mut w = BufWriter::new(File::create(path)?);

    writeln!(w, "# laser axis: offset_rad_s\tflux_density")?;
    for (i, f) in s.flux.iter().enumerate() {
        writeln!(w, "{:e}\t{:e}", s.grids.laser.value(i), f)?;
    }

    writeln!(w)?;
    writeln!(w, "# atomic axis: offset_rad_s\tcross_section_density")?;
    for (i, x) in s.cross_section.iter().enumerate() {
        writeln!(w, "{:e}\t{:e}", s.grids.atomic.value(i), x)?;
    }

    writeln!(w)?;
    writeln!(w, "# combined axis: detuning_rad_s\tabsorption_rate\texcitation\tatom_density")?;
    for i in 0..s.grids.combined.len() {
        writeln!(
            w,
            "{:e}\t{:e}\t{:e}\t{:e}",
            s.grids.combined.value(i),
            s.absorption_rate[i],
            s.excitation[i],
            s.atom_density[i],
        )?;
    }

    Ok(())
}
