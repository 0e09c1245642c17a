use clap::{App, Arg, SubCommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

//===========================================================================//

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let matches = App::new("icotool")
        .version("0.1")
        .about("Manipulates ICO files")
        .subcommand(
            SubCommand::with_name("create")
                .about("Creates an ICO file from an image file")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(
                    Arg::with_name("sizes")
                        .takes_value(true)
                        .value_name("SIZES")
                        .short("s")
                        .long("sizes")
                        .use_delimiter(true)
                        .help("Comma-separated icon sizes (1 to 256)"),
                )
                .arg(Arg::with_name("image").required(true)),
        )
        .subcommand(
            SubCommand::with_name("extract")
                .about("Extracts an image from an ICO file")
                .arg(
                    Arg::with_name("output")
                        .takes_value(true)
                        .value_name("PATH")
                        .short("o")
                        .long("output")
                        .help("Sets output path"),
                )
                .arg(Arg::with_name("ico").required(true))
                .arg(Arg::with_name("index").required(true)),
        )
        .subcommand(
            SubCommand::with_name("list")
                .about("Lists images in an ICO file")
                .arg(Arg::with_name("ico").required(true)),
        )
        .get_matches();
    if let Some(submatches) = matches.subcommand_matches("create") {
        let out_path = if let Some(path) = submatches.value_of("output") {
            PathBuf::from(path)
        } else {
            let mut path = PathBuf::from("out.ico");
            let mut index: i32 = 0;
            while path.exists() {
                index += 1;
                path = PathBuf::from(format!("out{}.ico", index));
            }
            path
        };
        let sizes: Vec<u32> = match submatches.values_of("sizes") {
            Some(values) => values.map(|size| size.parse().unwrap()).collect(),
            None => icokit::DEFAULT_SIZES.to_vec(),
        };
        let path = submatches.value_of("image").unwrap();
        let source = image::open(path).unwrap();
        println!("Rendering {:?} at {:?}", path, sizes);
        let data = icokit::encode_ico(&source, &sizes).unwrap();
        fs::write(out_path, data).unwrap();
    } else if let Some(submatches) = matches.subcommand_matches("extract") {
        let path = submatches.value_of("ico").unwrap();
        let document = icokit::decode_ico(&fs::read(path).unwrap()).unwrap();
        let index = submatches.value_of("index").unwrap();
        let index = index.parse::<usize>().unwrap();
        let image = &document.images()[index];
        let out_path = if let Some(path) = submatches.value_of("output") {
            PathBuf::from(path)
        } else {
            PathBuf::from(format!(
                "{}.{}.{}",
                path,
                index,
                image.format().extension()
            ))
        };
        fs::write(out_path, image.payload()).unwrap();
    } else if let Some(submatches) = matches.subcommand_matches("list") {
        let path = submatches.value_of("ico").unwrap();
        let document = icokit::decode_ico(&fs::read(path).unwrap()).unwrap();
        for (index, image) in document.images().iter().enumerate() {
            let kind = if image.is_png() { "PNG" } else { "BMP" };
            println!(
                "{:5}: {}x{} {}, {} bpp, {} bytes",
                index,
                image.width(),
                image.height(),
                kind,
                image.bit_depth(),
                image.embedded_data().len()
            );
        }
        for warning in document.warnings() {
            println!("warning: {}", warning);
        }
    }
}

//===========================================================================//
