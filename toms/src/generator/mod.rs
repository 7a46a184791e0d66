use crate::config::{GenerationConfig, Range};
use crate::utils::prelude::*;
use rand::RngExt as _;
use rand_core::RngCore;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TASK_FILE: &str = "task_generated.txt";
pub const NETWORK_FILE: &str = "network_generated.txt";
pub const NET_COMMANDER_FILE: &str = "network_commander_generated.txt";

/// Tirage uniforme entier dans des bornes inclusives.
fn draw_u32(range: Range<u32>, rng: &mut dyn RngCore) -> u32 {
    let [min, max] = range;
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Tirage uniforme flottant dans des bornes inclusives.
fn draw_f64(range: Range<f64>, rng: &mut dyn RngCore) -> f64 {
    let [min, max] = range;
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Écrit un fichier "deux entiers par ligne" (`count` lignes).
fn write_pairs(
    path: &Path,
    count: usize,
    first: Range<u32>,
    second: Range<u32>,
    rng: &mut dyn RngCore,
) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for _ in 0..count {
        let a = draw_u32(first, rng);
        let b = draw_u32(second, rng);
        writeln!(out, "{a} {b}")?;
    }
    out.flush()?;
    Ok(())
}

/// Génère la table réseau (`uplink downlink` par tâche).
pub fn gen_network(
    config: &GenerationConfig,
    out_dir: &Path,
    rng: &mut dyn RngCore,
) -> Result<PathBuf> {
    let path = out_dir.join(NETWORK_FILE);
    write_pairs(&path, config.n_networks, config.uplink, config.downlink, rng)?;
    info!(count = config.n_networks, path = %path.display(), "table réseau générée");
    Ok(path)
}

/// Génère la table des net-commanders (`intercept_out intercept_in` par tâche).
pub fn gen_net_commander(
    config: &GenerationConfig,
    out_dir: &Path,
    rng: &mut dyn RngCore,
) -> Result<PathBuf> {
    let path = out_dir.join(NET_COMMANDER_FILE);
    write_pairs(
        &path,
        config.n_net_commanders,
        config.intercept_out,
        config.intercept_in,
        rng,
    )?;
    info!(count = config.n_net_commanders, path = %path.display(), "table net-commander générée");
    Ok(path)
}

/// Génère le registre de tâches (colonnes séparées par des tabulations).
///
/// La période tirée est forcée strictement au-dessus du WCET : une tâche dont
/// le budget dépasse sa période serait infaisable quel que soit le placement.
pub fn gen_tasks(
    config: &GenerationConfig,
    out_dir: &Path,
    rng: &mut dyn RngCore,
) -> Result<PathBuf> {
    let path = out_dir.join(TASK_FILE);
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(
        out,
        "# wcet\tperiod\tmemreq\tmem_active_ratio\ttask_size\tinput_size\toutput_size\toffloading_bool"
    )?;

    for _ in 0..config.n_tasks {
        let wcet = draw_u32(config.wcet, rng);
        let mut period = draw_u32(config.period, rng);
        if period <= wcet {
            period = wcet + 1;
        }
        let memreq = draw_u32(config.memreq, rng);
        let mem_active_ratio = draw_f64(config.mem_active_ratio, rng);
        let task_size = draw_u32(config.task_size, rng);
        let input_size = draw_u32(config.input_size, rng);
        let output_size = draw_u32(config.output_size, rng);
        let offloading = u8::from(config.offloading_default);

        writeln!(
            out,
            "{wcet}\t{period}\t{memreq}\t{mem_active_ratio}\t{task_size}\t{input_size}\t{output_size}\t{offloading}"
        )?;
    }
    out.flush()?;
    info!(count = config.n_tasks, path = %path.display(), "registre de tâches généré");
    Ok(path)
}

/// Génère les trois fichiers d'un scénario dans `out_dir`.
pub fn gen_all(
    config: &GenerationConfig,
    out_dir: &Path,
    rng: &mut dyn RngCore,
) -> Result<Vec<PathBuf>> {
    Ok(vec![
        gen_tasks(config, out_dir, rng)?,
        gen_network(config, out_dir, rng)?,
        gen_net_commander(config, out_dir, rng)?,
    ])
}
