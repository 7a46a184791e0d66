use crate::utils::prelude::*;

// Capacités maximales des catalogues (bornes fixes, héritées du
// dimensionnement historique du simulateur).
pub const MAX_TASKS: usize = 1024;
pub const MAX_CPUFREQS: usize = 16;
pub const MAX_MEMS: usize = 8;
pub const MAX_CLOUDS: usize = 8;
pub const MAX_OFFLOADING_RATIOS: usize = 16;
pub const MAX_NETWORKS: usize = MAX_TASKS;
pub const MAX_NETCOMMANDERS: usize = MAX_TASKS;

/// Palier de fréquence CPU : facteur d'échelle du WCET + puissances.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CpuFreq {
    pub wcet_scale: f64,
    pub power_active: f64,
    pub power_idle: f64,
}

/// Palier mémoire : même forme que CpuFreq, sans contrainte d'ordre.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MemTier {
    pub wcet_scale: f64,
    pub power_active: f64,
    pub power_idle: f64,
}

/// Palier cloud : puissance de calcul du serveur distant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CloudTier {
    pub computation_power: f64,
}

/// Entrée réseau appariée par index de tâche (la tâche i lit l'entrée i).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Network {
    pub uplink: u32,
    pub downlink: u32,
}

/// Entrée net-commander appariée par index de tâche (latences d'interception).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NetCommander {
    pub intercept_out: u32,
    pub intercept_in: u32,
}

/// Catalogue des fréquences CPU.
///
/// L'insertion est append-only et doit se faire en `wcet_scale` strictement
/// décroissant ; toute violation est une erreur de configuration fatale.
#[derive(Debug, Clone, Default)]
pub struct CpuFreqCatalog {
    entries: Vec<CpuFreq>,
}

impl CpuFreqCatalog {
    pub fn add(&mut self, entry: CpuFreq) -> Result<()> {
        if self.entries.len() >= MAX_CPUFREQS {
            return Err(AppError::Resource("trop de fréquences cpu".into()));
        }
        if let Some(last) = self.entries.last() {
            if last.wcet_scale <= entry.wcet_scale {
                return Err(AppError::Resource(
                    "les fréquences cpu doivent être définies en ordre décroissant".into(),
                ));
            }
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&CpuFreq> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalogue des paliers mémoire (capacité seule).
#[derive(Debug, Clone, Default)]
pub struct MemCatalog {
    entries: Vec<MemTier>,
}

impl MemCatalog {
    pub fn add(&mut self, entry: MemTier) -> Result<()> {
        if self.entries.len() >= MAX_MEMS {
            return Err(AppError::Resource("trop de paliers mémoire".into()));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&MemTier> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalogue des paliers cloud.
#[derive(Debug, Clone, Default)]
pub struct CloudCatalog {
    entries: Vec<CloudTier>,
}

impl CloudCatalog {
    pub fn add(&mut self, entry: CloudTier) -> Result<()> {
        if self.entries.len() >= MAX_CLOUDS {
            return Err(AppError::Resource("trop de paliers cloud".into()));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&CloudTier> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalogue des ratios d'offloading.
///
/// Les valeurs doivent être insérées en ordre non décroissant : l'index 0 est
/// donc toujours le ratio minimal (celui imposé aux tâches sans offloading).
#[derive(Debug, Clone, Default)]
pub struct OffloadingRatioCatalog {
    entries: Vec<f64>,
}

impl OffloadingRatioCatalog {
    pub fn add(&mut self, ratio: f64) -> Result<()> {
        if self.entries.len() >= MAX_OFFLOADING_RATIOS {
            return Err(AppError::Resource("trop de ratios d'offloading".into()));
        }
        if let Some(&last) = self.entries.last() {
            if last > ratio {
                return Err(AppError::Resource(
                    "les ratios d'offloading doivent être définis en ordre croissant".into(),
                ));
            }
        }
        self.entries.push(ratio);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.entries.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Table réseau indexée par tâche.
#[derive(Debug, Clone, Default)]
pub struct NetworkTable {
    entries: Vec<Network>,
}

impl NetworkTable {
    pub fn add(&mut self, entry: Network) -> Result<()> {
        if self.entries.len() >= MAX_NETWORKS {
            return Err(AppError::Resource("trop d'entrées réseau".into()));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&Network> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Table net-commander indexée par tâche.
#[derive(Debug, Clone, Default)]
pub struct NetCommanderTable {
    entries: Vec<NetCommander>,
}

impl NetCommanderTable {
    pub fn add(&mut self, entry: NetCommander) -> Result<()> {
        if self.entries.len() >= MAX_NETCOMMANDERS {
            return Err(AppError::Resource("trop d'entrées net-commander".into()));
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, idx: usize) -> Option<&NetCommander> {
        self.entries.get(idx)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
