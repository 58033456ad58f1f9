use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cim_mbparser::MbParser;
use log::info;

const RULES: &str = "\
[C;X4]>>[C;X4;M1]
[O;X2]>>[O;X2;M2]
";

const MARKER_RDF: &str = "\
$RDFILE 1
$DATM    01/01/17 00:00
$RFMT
$RXN

  marker

  1  1
$DTYPE class
$DATUM ester
";

const EXT_CSV: &str = "\
EXTKEY,temperature,pressure
CCO,298.15,1.0
CC(=O)O,310.0,2.5
";

fn write(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = PathBuf::from(
        std::env::args()
            .nth(1)
            .unwrap_or_else(|| "sample_config".to_string()),
    );
    fs::create_dir_all(&out_dir).context("creating output directory")?;

    let svm = write(
        &out_dir,
        "svm.cfg",
        "-t 2 -c ^-2:2:5 -p ^-2 -e ^-3 -g ^-3:0:4\n\
         -t 0,t -c ^0:3:4\n\
         -t 1 -d 2:4:3 -r 0,1\n",
    )?;
    let model = write(
        &out_dir,
        "model.txt",
        "name := Sample model\n\
         description := Boiling points of small esters\n\
         nlim := 0.6\n\
         tol := 1e-3\n\
         report_units := K\n",
    )?;
    let rules = write(&out_dir, "rules.txt", RULES)?;
    let marker = write(&out_dir, "marker.rdf", MARKER_RDF)?;
    let fragmentor = write(
        &out_dir,
        "fragmentor.cfg",
        &format!(
            "fragment_type=3 min_length=2 max_length=4 useformalcharge=True header=a|b|c\n\
             fragment_type=9 marker_rules={} cgr_marker={}\n",
            rules.display(),
            marker.display()
        ),
    )?;
    let ext = write(&out_dir, "ext.csv", EXT_CSV)?;

    let parser = MbParser::new();
    let report = serde_json::json!({
        "svm": parser.get_svm_param(&[&svm])?,
        "model": parser.parse_model_description(&model)?,
        "fragmentor": parser.parse_fragmentor_opts(&fragmentor)?,
        "ext": parser.parse_ext(&[
            "s_option:solvent".to_string(),
            format!("conditions:{}", ext.display()),
        ])?,
    });

    info!("wrote sample configuration to {}", out_dir.display());
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
