// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use seamcarve::{
    calculate_energy, energy_to_image, load_image, logger, save_image, FrameWriter,
    NullObserver, SeamCarver, SeamObserver,
};
use std::process;

extern crate clap;

use clap::{crate_version, App, Arg, ArgMatches};
use failure::Error;
use log::info;

fn positive(value: String) -> Result<(), String> {
    match value.parse::<u32>() {
        Ok(v) if v > 0 => Ok(()),
        _ => Err(format!("'{}' is not a positive integer", value)),
    }
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    logger::init(matches.occurrences_of("verbose"))?;

    // clap has already insisted on an input.
    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output").unwrap_or("output.png");

    let image = load_image(input)?;
    let (width, height) = image.dimensions();
    println!("Current image dimensions are: {}x{}", width, height);

    let target = |name: &str, original: usize| {
        matches
            .value_of(name)
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(original)
    };
    let carver = SeamCarver::new(image, target("width", width), target("height", height));
    let (new_width, new_height) = carver.target();
    println!("New dimensions: {}x{}", new_width, new_height);

    if let Some(path) = matches.value_of("energy") {
        energy_to_image(&calculate_energy(carver.image()))
            .save(path)
            .map_err(|err| seamcarve::CarveError::Encode {
                path: path.to_string(),
                err,
            })?;
        info!("energy map written to {}", path);
    }

    let mut frames;
    let mut null = NullObserver;
    let observer: &mut dyn SeamObserver = match matches.value_of("frames") {
        Some(dir) => {
            frames = FrameWriter::new(dir)?;
            &mut frames
        }
        None => &mut null,
    };

    let carved = carver.carve(observer);
    save_image(&carved, output)?;
    println!("Wrote {}x{} image to {}", carved.width(), carved.height(), output);
    Ok(())
}

fn main() {
    let matches = App::new("seamcarve")
        .version(crate_version!())
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Content-aware image shrinking by seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to carve")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("width")
                .short("W")
                .long("width")
                .value_name("PIXELS")
                .help("Target width; defaults to the current width")
                .takes_value(true)
                .validator(positive),
        )
        .arg(
            Arg::with_name("height")
                .short("H")
                .long("height")
                .value_name("PIXELS")
                .help("Target height; defaults to the current height")
                .takes_value(true)
                .validator(positive),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("FILE")
                .help("Where to write the result [default: output.png]")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("frames")
                .long("frames")
                .value_name("DIR")
                .help("Write every seam, drawn over the image, to numbered PNGs in DIR")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy")
                .long("energy")
                .value_name("FILE")
                .help("Write the starting energy map as a greyscale image")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .multiple(true)
                .help("More logging; repeat for more"),
        )
        .get_matches();

    if let Err(err) = run(&matches) {
        eprintln!("seamcarve: {}", err);
        process::exit(1);
    }
}
