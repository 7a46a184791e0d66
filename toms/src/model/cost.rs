use crate::model::system::SystemModel;
use crate::utils::prelude::*;

/// 1 Mbps = 0.125 KB/ms (tailles en KB, temps en ms, débits en Mbps).
pub const MBPS_TO_KBMS: f64 = 0.125;

/// Facteur de ralentissement CPU en enclave (TEE), pondéré par la part
/// mémoire-active de la tâche.
pub const TEE_SLOWDOWN: f64 = 1.08;

/// Débit de chiffrement/déchiffrement TEE : 200 KB/ms pour l'encodage des
/// entrées et le décodage des sorties.
pub const TEE_CRYPTO_RATE: f64 = 200.0;

/// Mode d'évaluation du modèle de coût.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvalMode {
    Baseline,
    Tee,
}

impl EvalMode {
    pub fn from_tee_flag(tee: bool) -> Self {
        if tee {
            EvalMode::Tee
        } else {
            EvalMode::Baseline
        }
    }
}

/// Sorties du modèle de coût pour une tâche sous une affectation donnée.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskMetrics {
    pub utilization: f64,
    pub power_cpu: f64,
    pub power_mem: f64,
    pub power_net_com: f64,
    pub deadline_ratio: f64,
}

impl TaskMetrics {
    pub fn total_power(&self) -> f64 {
        self.power_cpu + self.power_mem + self.power_net_com
    }
}

/// Fonction pure : (tâche, quadruplet de ressources, mode) → métriques.
///
/// Précondition : la tâche et les quatre index doivent résoudre dans le
/// modèle (garanti par `PowerEvaluator::is_valid` côté optimiseur).
///
/// Aucune garde numérique n'est posée : les valeurs dégénérées (division par
/// un inverse nul, NaN/Inf) se propagent telles quelles dans l'agrégation de
/// fitness, qui les relègue en queue de classement.
pub fn task_metrics(
    model: &SystemModel,
    task_idx: usize,
    mem_type: usize,
    cloud_type: usize,
    cpufreq_type: usize,
    ratio_idx: usize,
    mode: EvalMode,
) -> TaskMetrics {
    let task = model.tasks.get(task_idx).expect("index de tâche invalide");
    let mem = model.mems.get(mem_type).expect("index mémoire invalide");
    let cloud = model.clouds.get(cloud_type).expect("index cloud invalide");
    let cpufreq = model
        .cpufreqs
        .get(cpufreq_type)
        .expect("index cpufreq invalide");
    // Couplage par index : la tâche i lit toujours l'entrée i
    let network = model.networks.get(task_idx).expect("entrée réseau absente");
    let net_commander = model
        .net_commanders
        .get(task_idx)
        .expect("entrée net-commander absente");

    // Une tâche sans offloading reste épinglée au ratio minimal du catalogue
    let ratio = if task.offloading {
        model
            .offloading_ratios
            .get(ratio_idx)
            .expect("index de ratio invalide")
    } else {
        model
            .offloading_ratios
            .get(0)
            .expect("catalogue de ratios vide")
    };

    let wcet = task.wcet as f64;
    let period = task.period as f64;
    let mem_active_ratio = task.mem_active_ratio;

    let wcet_scaled_cpu = 1.0 / cpufreq.wcet_scale;
    let wcet_scaled_mem = 1.0 / mem.wcet_scale;
    let wcet_scaled_cloud = 1.0 / cloud.computation_power;

    let wcet_scaled = wcet * wcet_scaled_cpu * wcet_scaled_mem;

    // Contrôle d'échéance historique, désactivé pour l'instant (code 3 réservé) :
    // if wcet_scaled >= period {
    //     fatal!(3, "tâche {} : wcet recalé dépasse la période : {} > {}", task.no, wcet_scaled, period);
    // }

    let (transtime, netcomtime) = if network.uplink > 0 && network.downlink > 0 {
        let transtime = ((task.task_size + task.input_size) as f64 / network.uplink as f64
            + task.output_size as f64 / network.downlink as f64)
            / MBPS_TO_KBMS;
        let mut netcomtime = (net_commander.intercept_out + net_commander.intercept_in) as f64;

        if mode == EvalMode::Tee {
            // Encodage des entrées + décodage des sorties en enclave
            let input_encode_time = task.input_size as f64 / TEE_CRYPTO_RATE;
            let output_decode_time = task.output_size as f64 / TEE_CRYPTO_RATE;
            netcomtime += input_encode_time + output_decode_time;
        }

        (transtime, netcomtime)
    } else {
        (0.0, 0.0)
    };

    let utilization =
        (wcet_scaled * (1.0 - ratio) + wcet_scaled_cpu * netcomtime * ratio) / period;

    let cloud_exec = match mode {
        EvalMode::Baseline => wcet_scaled_cloud * wcet,
        EvalMode::Tee => {
            wcet_scaled_cloud
                * wcet
                * ((1.0 - mem_active_ratio) + TEE_SLOWDOWN * mem_active_ratio)
        }
    };
    let deadline_ratio =
        (cloud_exec + wcet_scaled_cpu * netcomtime + transtime) / period * ratio;

    let cpu_power_unit = (cpufreq.power_active * wcet_scaled_cpu
        + cpufreq.power_idle * wcet_scaled_mem)
        / (wcet_scaled_cpu + wcet_scaled_mem);
    let power_cpu = cpu_power_unit * (wcet_scaled / period) * (1.0 - ratio)
        + cpu_power_unit * (netcomtime / period) * ratio;

    let net_com_power_unit = 1.0;
    let power_net_com = net_com_power_unit * (transtime / period) * ratio;

    let memreq = task.memreq as f64;
    let power_mem = memreq
        * (mem_active_ratio * mem.power_active + (1.0 - mem_active_ratio) * mem.power_idle)
        * (wcet_scaled / period)
        + memreq * mem.power_idle * (1.0 - wcet_scaled / period);

    TaskMetrics {
        utilization,
        power_cpu,
        power_mem,
        power_net_com,
        deadline_ratio,
    }
}

// --- Tests Unitaires ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resources::{
        CloudCatalog, CloudTier, CpuFreq, CpuFreqCatalog, MemCatalog, MemTier, NetCommander,
        NetCommanderTable, Network, NetworkTable, OffloadingRatioCatalog,
    };
    use crate::model::task::{Task, TaskSet};

    fn build_model(uplink: u32, downlink: u32, intercepts: (u32, u32)) -> SystemModel {
        let mut tasks = TaskSet::new();
        tasks
            .add_task(Task {
                no: 0,
                wcet: 10,
                period: 100,
                memreq: 0,
                mem_active_ratio: 0.0,
                task_size: 0,
                input_size: 0,
                output_size: 0,
                offloading: true,
            })
            .unwrap();

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
        ratios.add(0.5).unwrap();

        let mut networks = NetworkTable::default();
        networks.add(Network { uplink, downlink }).unwrap();
        let mut ncs = NetCommanderTable::default();
        ncs.add(NetCommander {
            intercept_out: intercepts.0,
            intercept_in: intercepts.1,
        })
        .unwrap();

        SystemModel::build(tasks, mems, clouds, cpufreqs, networks, ncs, ratios).unwrap()
    }

    #[test]
    fn test_reference_scenario_with_degenerate_network() {
        // Scénario de référence : réseau 0/0, ratio 0
        let model = build_model(0, 0, (0, 0));

        // La passe de construction a déjà coupé l'offloading
        assert!(!model.tasks.get(0).unwrap().offloading);

        let m = task_metrics(&model, 0, 0, 0, 0, 0, EvalMode::Baseline);
        assert!((m.utilization - 0.1).abs() < 1e-12);
        assert_eq!(m.deadline_ratio, 0.0);
        assert_eq!(m.power_net_com, 0.0);
        assert_eq!(m.power_mem, 0.0);
        // cpu_power_unit = (2*1 + 1*1)/2 = 1.5 ; power_cpu = 1.5 * 0.1
        assert!((m.power_cpu - 0.15).abs() < 1e-12);
    }

    #[test]
    fn test_offloading_contributes_to_deadline_and_net_power() {
        let model = build_model(100, 100, (2, 3));
        let m = task_metrics(&model, 0, 0, 0, 0, 1, EvalMode::Baseline);

        // ratio 0.5 : la part cloud et l'interception pèsent sur l'échéance
        // deadline = (1*10 + 1*5 + 0)/100 * 0.5 = 0.075 (tailles nulles => transtime 0)
        assert!((m.deadline_ratio - 0.075).abs() < 1e-12);
        assert_eq!(m.power_net_com, 0.0);

        // util = (10*0.5 + 5*0.5)/100 = 0.075
        assert!((m.utilization - 0.075).abs() < 1e-12);
    }

    #[test]
    fn test_transtime_conversion_mbps_to_kb_per_ms() {
        let mut model = build_model(8, 8, (0, 0));
        // tâche avec tailles non nulles
        let mut tasks = TaskSet::new();
        tasks
            .add_task(Task {
                no: 0,
                wcet: 10,
                period: 1000,
                memreq: 0,
                mem_active_ratio: 0.0,
                task_size: 100,
                input_size: 0,
                output_size: 0,
                offloading: true,
            })
            .unwrap();
        model.tasks = tasks;

        let m = task_metrics(&model, 0, 0, 0, 0, 1, EvalMode::Baseline);
        // transtime = (100/8)/0.125 = 100 ms ; power_net = (100/1000)*0.5 = 0.05
        assert!((m.power_net_com - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_tee_deadline_never_below_baseline() {
        let model = build_model(50, 60, (2, 4));
        let mut tasks = TaskSet::new();
        tasks
            .add_task(Task {
                no: 0,
                wcet: 200,
                period: 2000,
                memreq: 12,
                mem_active_ratio: 0.3,
                task_size: 1500,
                input_size: 400,
                output_size: 600,
                offloading: true,
            })
            .unwrap();
        let mut model = model;
        model.tasks = tasks;

        for ratio_idx in 0..model.offloading_ratios.len() {
            let base = task_metrics(&model, 0, 0, 0, 0, ratio_idx, EvalMode::Baseline);
            let tee = task_metrics(&model, 0, 0, 0, 0, ratio_idx, EvalMode::Tee);
            assert!(tee.deadline_ratio >= base.deadline_ratio);
        }
    }

    #[test]
    fn test_cost_model_is_deterministic() {
        let model = build_model(50, 60, (2, 4));
        let a = task_metrics(&model, 0, 0, 0, 0, 1, EvalMode::Tee);
        let b = task_metrics(&model, 0, 0, 0, 0, 1, EvalMode::Tee);
        assert_eq!(a, b);
    }
}
