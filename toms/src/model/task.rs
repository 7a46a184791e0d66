use crate::model::resources::MAX_TASKS;
use crate::utils::prelude::*;
use std::path::Path;

/// Descripteur d'une tâche périodique.
///
/// `no` est attribué à l'enregistrement (1-based) et reste stable pour toute
/// la durée de l'exécution. Seul le drapeau `offloading` peut être modifié
/// après coup (coupure globale si un réseau apparié est dégénéré,
/// voir model/system.rs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub no: u32,
    pub wcet: u32,
    pub period: u32,
    pub memreq: u32,
    pub mem_active_ratio: f64,
    pub task_size: u32,
    pub input_size: u32,
    pub output_size: u32,
    #[serde(default = "default_offloading")]
    pub offloading: bool,
}

fn default_offloading() -> bool {
    true
}

/// Registre ordonné des tâches (append-only).
#[derive(Debug, Clone, Default)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Enregistre une tâche et lui attribue son numéro (1-based).
    /// Une période nulle est un contrat de configuration violé : fatal.
    pub fn add_task(&mut self, mut task: Task) -> Result<()> {
        if self.tasks.len() >= MAX_TASKS {
            return Err(AppError::Resource("trop de tâches".into()));
        }
        if task.period == 0 {
            return Err(AppError::Config(format!(
                "tâche {} : période nulle interdite",
                self.tasks.len() + 1
            )));
        }
        task.no = self.tasks.len() as u32 + 1;
        self.tasks.push(task);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Task> {
        self.tasks.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Coupe l'offloading pour toutes les tâches du registre.
    pub fn disable_offloading_all(&mut self) {
        for task in &mut self.tasks {
            task.offloading = false;
        }
    }

    /// Charge un fichier de tâches généré (format texte tabulé) :
    /// `wcet period memreq mem_active_ratio task_size input_size output_size offloading_bool`
    /// Les lignes vides et les commentaires `#` sont ignorés.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut set = TaskSet::new();

        for (lineno, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 8 {
                return Err(AppError::Config(format!(
                    "{} ligne {} : 8 champs attendus, {} trouvés",
                    path.display(),
                    lineno + 1,
                    fields.len()
                )));
            }

            let parse_u32 = |s: &str, name: &str| -> Result<u32> {
                s.parse().map_err(|_| {
                    AppError::Config(format!(
                        "{} ligne {} : champ '{}' invalide : {}",
                        path.display(),
                        lineno + 1,
                        name,
                        s
                    ))
                })
            };
            let mem_active_ratio: f64 = fields[3].parse().map_err(|_| {
                AppError::Config(format!(
                    "{} ligne {} : mem_active_ratio invalide : {}",
                    path.display(),
                    lineno + 1,
                    fields[3]
                ))
            })?;

            set.add_task(Task {
                no: 0,
                wcet: parse_u32(fields[0], "wcet")?,
                period: parse_u32(fields[1], "period")?,
                memreq: parse_u32(fields[2], "memreq")?,
                mem_active_ratio,
                task_size: parse_u32(fields[4], "task_size")?,
                input_size: parse_u32(fields[5], "input_size")?,
                output_size: parse_u32(fields[6], "output_size")?,
                offloading: parse_u32(fields[7], "offloading_bool")? != 0,
            })?;
        }

        Ok(set)
    }
}
