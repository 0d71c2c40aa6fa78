use std::fs::{self, File};
use std::io::{stdin, stdout, BufRead, BufReader, BufWriter, Write};

use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use log::info;

use diacritics::scorer::Evaluation;
use diacritics::{DirectorySource, FrequencyMap, MappingBuilder, RestoreOptions};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let keep_ellipsis = Arg::with_name("keep-ellipsis")
        .long("keep-ellipsis")
        .help("Write a trailing `...` back after restoring a word. It is dropped otherwise.");

    let matches = App::new("diacritics")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build a diacritics mapping from Czech text, or use one to restore diacritics.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("build")
                .about("Create a mapping from a corpus of correctly written Czech")
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File where the newly built mapping will be written.")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("Text file to learn from. Every file is one document.")
                        .takes_value(true)
                        .multiple(true)
                        .required_unless("corpus-dir"),
                )
                .arg(
                    Arg::with_name("corpus-dir")
                        .short("d")
                        .long("corpus-dir")
                        .value_name("DIR")
                        .help("Directory of `<id>.txt` documents to learn from.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("ids")
                        .long("ids")
                        .value_name("ID")
                        .help("Documents to take from the corpus directory. All of them by default.")
                        .takes_value(true)
                        .multiple(true)
                        .requires("corpus-dir"),
                ),
        )
        .subcommand(
            SubCommand::with_name("restore")
                .about("Restore diacritics in text using a mapping")
                .arg(
                    Arg::with_name("mapping")
                        .short("m")
                        .long("mapping")
                        .value_name("FILE")
                        .help("File containing the mapping produced by `build` command")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("File containing text without diacritics. stdin by default.")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("File into which restored text will be written. stdout by default.")
                        .takes_value(true),
                )
                .arg(keep_ellipsis.clone()),
        )
        .subcommand(
            SubCommand::with_name("evaluate")
                .about("Restore a corrupted text and compare it with the correct one")
                .arg(
                    Arg::with_name("mapping")
                        .short("m")
                        .long("mapping")
                        .value_name("FILE")
                        .help("File containing the mapping produced by `build` command")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("corrupted")
                        .short("c")
                        .long("corrupted")
                        .value_name("FILE")
                        .help("File containing the text without diacritics.")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("gold")
                        .short("g")
                        .long("gold")
                        .value_name("FILE")
                        .help("File containing the same text with correct diacritics.")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("restored")
                        .short("r")
                        .long("restored")
                        .value_name("FILE")
                        .help("File into which the restored text will be written.")
                        .takes_value(true),
                )
                .arg(keep_ellipsis),
        )
        .get_matches();

    match matches.subcommand() {
        ("build", Some(matches)) => do_build(matches),
        ("restore", Some(matches)) => do_restore(matches),
        ("evaluate", Some(matches)) => do_evaluate(matches),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn restore_options(matches: &ArgMatches) -> RestoreOptions {
    RestoreOptions {
        keep_ellipsis: matches.is_present("keep-ellipsis"),
    }
}

fn load_mapping(matches: &ArgMatches) -> Result<FrequencyMap> {
    // required argument
    let filename = matches.value_of("mapping").unwrap();
    let mapping = FrequencyMap::load_from_file(filename)
        .with_context(|| format!("cannot load mapping from {}", filename))?;
    info!("loaded mapping with {} stripped forms from {}", mapping.len(), filename);

    Ok(mapping)
}

fn do_build(matches: &ArgMatches) -> Result<()> {
    // required argument
    let output_filename = matches.value_of("output").unwrap();
    let mut builder = MappingBuilder::new();

    for filename in matches.values_of("input").into_iter().flatten() {
        builder
            .add_text_from_file(filename)
            .with_context(|| format!("cannot read training data from {}", filename))?;
    }

    if let Some(dir) = matches.value_of("corpus-dir") {
        let source = DirectorySource::new(dir);
        let ids: Vec<String> = match matches.values_of("ids") {
            Some(ids) => ids.map(str::to_owned).collect(),
            None => source
                .ids()
                .with_context(|| format!("cannot list corpus directory {}", dir))?,
        };
        info!("reading {} documents from {}", ids.len(), source.root().display());
        builder.add_documents_from_source(&source, &ids);
    }

    let mapping = builder.into_mapping();
    mapping
        .save_to_file(output_filename)
        .with_context(|| format!("cannot save mapping to {}", output_filename))?;
    info!("mapping saved to {}", output_filename);

    Ok(())
}

fn do_restore(matches: &ArgMatches) -> Result<()> {
    let mapping = load_mapping(matches)?;
    let options = restore_options(matches);

    let input: Box<dyn BufRead> = match matches.value_of("input") {
        Some(filename) => Box::new(BufReader::new(
            File::open(filename).with_context(|| format!("cannot open {}", filename))?,
        )),
        None => Box::new(BufReader::new(stdin())),
    };

    let mut output: Box<dyn Write> = match matches.value_of("output") {
        Some(filename) => Box::new(BufWriter::new(
            File::create(filename).with_context(|| format!("cannot create {}", filename))?,
        )),
        None => Box::new(stdout()),
    };

    for line in input.lines() {
        let restored = mapping.restore_text_with(&line?, &options);
        output.write_all(restored.as_bytes())?;
        output.write_all(b"\n")?;
    }
    output.flush()?;

    Ok(())
}

fn do_evaluate(matches: &ArgMatches) -> Result<()> {
    let mapping = load_mapping(matches)?;
    let options = restore_options(matches);

    // both are required arguments
    let corrupted_filename = matches.value_of("corrupted").unwrap();
    let gold_filename = matches.value_of("gold").unwrap();

    let corrupted = fs::read_to_string(corrupted_filename)
        .with_context(|| format!("cannot read {}", corrupted_filename))?;
    let gold = fs::read_to_string(gold_filename)
        .with_context(|| format!("cannot read {}", gold_filename))?;

    info!("restoring diacritics in {}", corrupted_filename);
    let restored = mapping.restore_text_with(&corrupted, &options);

    if let Some(filename) = matches.value_of("restored") {
        fs::write(filename, &restored).with_context(|| format!("cannot write {}", filename))?;
        info!("restored text written to {}", filename);
    }

    println!("{}", Evaluation::compare(&corrupted, &restored, &gold));

    Ok(())
}
