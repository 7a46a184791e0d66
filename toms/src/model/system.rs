use crate::config::SimulationConfig;
use crate::model::resources::{
    CloudCatalog, CpuFreqCatalog, MemCatalog, NetCommanderTable, NetworkTable,
    OffloadingRatioCatalog,
};
use crate::model::task::TaskSet;
use crate::utils::prelude::*;
use std::path::Path;

/// L'état partagé du problème : registre de tâches + catalogues.
///
/// Construit en une seule phase d'initialisation, puis strictement en lecture
/// seule pendant toute l'optimisation — l'évaluation parallèle ne repose sur
/// aucun verrou.
#[derive(Debug, Clone)]
pub struct SystemModel {
    pub tasks: TaskSet,
    pub mems: MemCatalog,
    pub clouds: CloudCatalog,
    pub cpufreqs: CpuFreqCatalog,
    pub networks: NetworkTable,
    pub net_commanders: NetCommanderTable,
    pub offloading_ratios: OffloadingRatioCatalog,
}

impl SystemModel {
    /// Assemble et valide le modèle.
    ///
    /// Invariants vérifiés ici :
    /// - chaque catalogue contient au moins une entrée ;
    /// - le couplage par index (la tâche i lit l'entrée réseau/net-commander i)
    ///   impose des tables de même longueur que le registre de tâches.
    ///
    /// Puis passe de dégradation réseau : si une tâche quelconque est appariée
    /// à un réseau à uplink ou downlink nul, l'offloading est coupé pour
    /// TOUTES les tâches du registre, une fois pour toutes, avant la première
    /// évaluation.
    pub fn build(
        mut tasks: TaskSet,
        mems: MemCatalog,
        clouds: CloudCatalog,
        cpufreqs: CpuFreqCatalog,
        networks: NetworkTable,
        net_commanders: NetCommanderTable,
        offloading_ratios: OffloadingRatioCatalog,
    ) -> Result<Self> {
        if tasks.is_empty() {
            return Err(AppError::Config("aucune tâche enregistrée".into()));
        }
        if mems.is_empty()
            || clouds.is_empty()
            || cpufreqs.is_empty()
            || offloading_ratios.is_empty()
        {
            return Err(AppError::Config(
                "chaque catalogue (mem, cloud, cpufreq, ratios) doit contenir au moins une entrée"
                    .into(),
            ));
        }
        if networks.len() != tasks.len() {
            return Err(AppError::Config(format!(
                "couplage par index rompu : {} entrées réseau pour {} tâches",
                networks.len(),
                tasks.len()
            )));
        }
        if net_commanders.len() != tasks.len() {
            return Err(AppError::Config(format!(
                "couplage par index rompu : {} entrées net-commander pour {} tâches",
                net_commanders.len(),
                tasks.len()
            )));
        }

        let degenerate = (0..tasks.len()).any(|i| {
            let net = networks.get(i).unwrap();
            net.uplink == 0 || net.downlink == 0
        });
        if degenerate {
            warn!("réseau dégénéré détecté (uplink ou downlink nul) : offloading coupé pour toutes les tâches");
            tasks.disable_offloading_all();
        }

        Ok(Self {
            tasks,
            mems,
            clouds,
            cpufreqs,
            networks,
            net_commanders,
            offloading_ratios,
        })
    }

    /// Construit le modèle depuis une configuration chargée.
    /// `base_dir` sert de racine pour résoudre les fichiers référencés.
    pub fn from_config(config: &SimulationConfig, base_dir: &Path) -> Result<Self> {
        let mut cpufreqs = CpuFreqCatalog::default();
        for entry in &config.cpufreqs {
            cpufreqs.add(*entry)?;
        }

        let mut mems = MemCatalog::default();
        for entry in &config.mems {
            mems.add(*entry)?;
        }

        let mut clouds = CloudCatalog::default();
        for entry in &config.clouds {
            clouds.add(*entry)?;
        }

        let mut offloading_ratios = OffloadingRatioCatalog::default();
        for &ratio in &config.offloading_ratios {
            offloading_ratios.add(ratio)?;
        }

        let tasks = config.load_tasks(base_dir)?;
        let networks = config.load_networks(base_dir)?;
        let net_commanders = config.load_net_commanders(base_dir)?;

        Self::build(
            tasks,
            mems,
            clouds,
            cpufreqs,
            networks,
            net_commanders,
            offloading_ratios,
        )
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resources::{CloudTier, CpuFreq, MemTier, NetCommander, Network};
    use crate::model::task::Task;

    fn one_task(offloading: bool) -> TaskSet {
        let mut set = TaskSet::new();
        set.add_task(Task {
            no: 0,
            wcet: 10,
            period: 100,
            memreq: 0,
            mem_active_ratio: 0.0,
            task_size: 0,
            input_size: 0,
            output_size: 0,
            offloading,
        })
        .unwrap();
        set
    }

    fn catalogs() -> (MemCatalog, CloudCatalog, CpuFreqCatalog, OffloadingRatioCatalog) {
        let mut mems = MemCatalog::default();
        mems.add(MemTier { wcet_scale: 1.0, power_active: 1.0, power_idle: 0.5 })
            .unwrap();
        let mut clouds = CloudCatalog::default();
        clouds.add(CloudTier { computation_power: 1.0 }).unwrap();
        let mut cpufreqs = CpuFreqCatalog::default();
        cpufreqs
            .add(CpuFreq { wcet_scale: 1.0, power_active: 2.0, power_idle: 1.0 })
            .unwrap();
        let mut ratios = OffloadingRatioCatalog::default();
        ratios.add(0.0).unwrap();
        (mems, clouds, cpufreqs, ratios)
    }

    #[test]
    fn test_build_rejects_index_coupling_mismatch() {
        let (mems, clouds, cpufreqs, ratios) = catalogs();
        let networks = NetworkTable::default(); // vide : 0 entrée pour 1 tâche
        let mut ncs = NetCommanderTable::default();
        ncs.add(NetCommander { intercept_out: 0, intercept_in: 0 })
            .unwrap();

        let err = SystemModel::build(one_task(true), mems, clouds, cpufreqs, networks, ncs, ratios)
            .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_degenerate_network_clears_all_offloading_flags() {
        let (mems, clouds, cpufreqs, ratios) = catalogs();
        let mut networks = NetworkTable::default();
        networks.add(Network { uplink: 0, downlink: 0 }).unwrap();
        let mut ncs = NetCommanderTable::default();
        ncs.add(NetCommander { intercept_out: 0, intercept_in: 0 })
            .unwrap();

        let model =
            SystemModel::build(one_task(true), mems, clouds, cpufreqs, networks, ncs, ratios)
                .unwrap();
        assert!(model.tasks.iter().all(|t| !t.offloading));
    }

    #[test]
    fn test_healthy_network_keeps_offloading_flags() {
        let (mems, clouds, cpufreqs, ratios) = catalogs();
        let mut networks = NetworkTable::default();
        networks.add(Network { uplink: 100, downlink: 100 }).unwrap();
        let mut ncs = NetCommanderTable::default();
        ncs.add(NetCommander { intercept_out: 1, intercept_in: 1 })
            .unwrap();

        let model =
            SystemModel::build(one_task(true), mems, clouds, cpufreqs, networks, ncs, ratios)
                .unwrap();
        assert!(model.tasks.iter().all(|t| t.offloading));
    }
}
