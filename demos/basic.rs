use std::io::Cursor;

use linedict::{Kind, Reader};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum Scheme {
    Hlle,
    Roe,
}

fn scheme(name: &str) -> Option<Scheme> {
    match name {
        "HLLE" => Some(Scheme::Hlle),
        "ROE" => Some(Scheme::Roe),
        _ => None,
    }
}

fn main() -> Result<(), linedict::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let dict = Reader::builder().load_path("demos/example.cfg")?;
    println!("{}", dict.dump());

    // Fall back to defaults for anything the file leaves out
    let cfl = if dict.check_float("CFL_NUMBER") {
        dict.get_float("CFL_NUMBER")?
    } else {
        0.5
    };
    dict.batch(|ns| {
        if !ns.check("SCHEME", Kind::Str) {
            ns.add("SCHEME", "HLLE");
        }
    });
    let scheme = scheme(&dict.get_string("SCHEME")?);
    let verbose = dict.get_bool("VERBOSE").unwrap_or(false);

    println!("CFL_NUMBER is set to {cfl}");
    println!("SCHEME is set to {scheme:?}");
    println!("VERBOSE is set to {verbose}");

    let mut stream = Cursor::new("String 1\ntest teststring\nfloat 1.05\nWARNING This is a warning\n");
    let streamed = Reader::builder()
        .on_diagnostic(|d| println!("diagnostic: {d}"))
        .load_stream(&mut stream)?;
    println!("{}", streamed.dump());

    Ok(())
}
