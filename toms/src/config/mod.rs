use crate::genetics::engine::GeneticConfig;
use crate::model::resources::{CloudTier, CpuFreq, MemTier, NetCommander, NetCommanderTable, Network, NetworkTable};
use crate::model::task::{Task, TaskSet};
use crate::utils::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Bornes inclusives `[min, max]` pour un tirage uniforme.
pub type Range<T> = [T; 2];

/// Paramétrage du générateur de scénarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub n_tasks: usize,
    pub wcet: Range<u32>,
    pub period: Range<u32>,
    pub memreq: Range<u32>,
    pub mem_active_ratio: Range<f64>,
    pub task_size: Range<u32>,
    pub input_size: Range<u32>,
    pub output_size: Range<u32>,
    #[serde(default = "default_true")]
    pub offloading_default: bool,
    pub n_networks: usize,
    pub uplink: Range<u32>,
    pub downlink: Range<u32>,
    pub n_net_commanders: usize,
    pub intercept_out: Range<u32>,
    pub intercept_in: Range<u32>,
}

fn default_true() -> bool {
    true
}

/// Configuration complète d'une simulation, désérialisée depuis un JSON.
///
/// Les tâches, réseaux et net-commanders peuvent être donnés en ligne
/// (`tasks`) ou par fichier (`tasks_file`, chemin relatif au fichier de
/// configuration). Fournir les deux à la fois est une erreur.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub cpufreqs: Vec<CpuFreq>,
    pub mems: Vec<MemTier>,
    pub clouds: Vec<CloudTier>,
    pub offloading_ratios: Vec<f64>,

    #[serde(default)]
    pub tasks: Option<Vec<Task>>,
    #[serde(default)]
    pub tasks_file: Option<String>,

    #[serde(default)]
    pub networks: Option<Vec<Network>>,
    #[serde(default)]
    pub networks_file: Option<String>,

    #[serde(default)]
    pub net_commanders: Option<Vec<NetCommander>>,
    #[serde(default)]
    pub net_commanders_file: Option<String>,

    /// Active le modèle de coût TEE (chiffrement des transferts + ralentissement enclave).
    #[serde(default)]
    pub tee: bool,

    #[serde(default)]
    pub genetic: Option<GeneticConfig>,

    #[serde(default)]
    pub generation: Option<GenerationConfig>,
}

impl SimulationConfig {
    /// Charge la configuration et renvoie le répertoire servant de racine
    /// pour résoudre les fichiers référencés.
    pub fn load(path: &Path) -> Result<(Self, PathBuf)> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("lecture de {} impossible : {e}", path.display()))
        })?;
        let config: SimulationConfig = serde_json::from_str(&raw)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok((config, base_dir))
    }

    pub fn load_tasks(&self, base_dir: &Path) -> Result<TaskSet> {
        match (&self.tasks, &self.tasks_file) {
            (Some(_), Some(_)) => Err(AppError::Config(
                "`tasks` et `tasks_file` sont mutuellement exclusifs".into(),
            )),
            (Some(inline), None) => {
                let mut set = TaskSet::new();
                for task in inline {
                    set.add_task(task.clone())?;
                }
                Ok(set)
            }
            (None, Some(file)) => TaskSet::from_file(&base_dir.join(file)),
            (None, None) => Err(AppError::Config(
                "aucune source de tâches (`tasks` ou `tasks_file`)".into(),
            )),
        }
    }

    pub fn load_networks(&self, base_dir: &Path) -> Result<NetworkTable> {
        match (&self.networks, &self.networks_file) {
            (Some(_), Some(_)) => Err(AppError::Config(
                "`networks` et `networks_file` sont mutuellement exclusifs".into(),
            )),
            (Some(inline), None) => {
                let mut table = NetworkTable::default();
                for entry in inline {
                    table.add(*entry)?;
                }
                Ok(table)
            }
            (None, Some(file)) => {
                let mut table = NetworkTable::default();
                for (uplink, downlink) in read_pairs(&base_dir.join(file))? {
                    table.add(Network { uplink, downlink })?;
                }
                Ok(table)
            }
            (None, None) => Err(AppError::Config(
                "aucune source de réseaux (`networks` ou `networks_file`)".into(),
            )),
        }
    }

    pub fn load_net_commanders(&self, base_dir: &Path) -> Result<NetCommanderTable> {
        match (&self.net_commanders, &self.net_commanders_file) {
            (Some(_), Some(_)) => Err(AppError::Config(
                "`net_commanders` et `net_commanders_file` sont mutuellement exclusifs".into(),
            )),
            (Some(inline), None) => {
                let mut table = NetCommanderTable::default();
                for entry in inline {
                    table.add(*entry)?;
                }
                Ok(table)
            }
            (None, Some(file)) => {
                let mut table = NetCommanderTable::default();
                for (intercept_out, intercept_in) in read_pairs(&base_dir.join(file))? {
                    table.add(NetCommander { intercept_out, intercept_in })?;
                }
                Ok(table)
            }
            (None, None) => Err(AppError::Config(
                "aucune source de net-commanders (`net_commanders` ou `net_commanders_file`)"
                    .into(),
            )),
        }
    }
}

/// Lit un fichier "deux entiers non signés par ligne" (lignes vides et `#` ignorés).
fn read_pairs(path: &Path) -> Result<Vec<(u32, u32)>> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("lecture de {} impossible : {e}", path.display())))?;

    let mut pairs = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let parse = |field: Option<&str>| -> Result<u32> {
            field
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "{} ligne {} : deux champs attendus",
                        path.display(),
                        line_no + 1
                    ))
                })?
                .parse::<u32>()
                .map_err(|e| {
                    AppError::Config(format!(
                        "{} ligne {} : entier invalide ({e})",
                        path.display(),
                        line_no + 1
                    ))
                })
        };
        let first = parse(fields.next())?;
        let second = parse(fields.next())?;
        if fields.next().is_some() {
            return Err(AppError::Config(format!(
                "{} ligne {} : champs excédentaires",
                path.display(),
                line_no + 1
            )));
        }
        pairs.push((first, second));
    }
    Ok(pairs)
}
