use std::env;
use std::process::Command;

/// Options derived from the host machine used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
    pub no_default_features: bool,
    pub rustflags: Option<String>,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }

    fn apply_features(&self, cmd: &mut Command) {
        if self.no_default_features {
            cmd.arg("--no-default-features");
        }
        if let Some(f) = self.features_arg() {
            cmd.arg("--features").arg(f);
        }
    }

    fn apply_rustflags(&self, cmd: &mut Command) {
        if let Some(rf) = &self.rustflags {
            cmd.env("RUSTFLAGS", rf);
        }
    }
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let arch = detect_arch();
    let cpu_flags = detect_cpu_flags();
    let extra = env::var("FFTCMP_FEATURES").unwrap_or_default();
    compute_config(&arch, &cpu_flags, &extra)
}

fn detect_arch() -> String {
    if let Ok(arch) = env::var("ARCH") {
        if !arch.trim().is_empty() {
            return arch;
        }
    }
    Command::new("uname")
        .arg("-m")
        .output()
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_else(|_| env::consts::ARCH.to_string())
}

fn detect_cpu_flags() -> String {
    if let Ok(out) = Command::new("lscpu").output() {
        let s = String::from_utf8_lossy(&out.stdout);
        for line in s.lines() {
            if line.to_lowercase().contains("flags") {
                return line.to_string();
            }
        }
    }
    if let Ok(out) = Command::new("sysctl")
        .args(["-n", "machdep.cpu.features"])
        .output()
    {
        return String::from_utf8_lossy(&out.stdout).to_string();
    }
    String::new()
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
///
/// `extra` is a whitespace separated feature list. A leading `-default`
/// entry turns off the default library bindings so only the baseline and the
/// listed features are compiled.
pub fn compute_config(arch: &str, cpu_flags: &str, extra: &str) -> BuildConfig {
    let mut rustflags = None;

    if arch.contains("x86_64") {
        if cpu_flags.contains("avx512f") {
            rustflags = Some("-C target-feature=+avx512f,+avx2,+fma".into());
        } else if cpu_flags.contains("avx2") {
            rustflags = Some("-C target-feature=+avx2,+fma".into());
        } else if cpu_flags.contains("sse4_1") {
            rustflags = Some("-C target-feature=+sse4.1".into());
        }
    } else if arch.contains("aarch64") || arch.contains("arm64") {
        rustflags = Some("-C target-feature=+neon".into());
    }

    let mut features = Vec::new();
    let mut no_default_features = false;
    for feat in extra.split_whitespace() {
        if feat == "-default" {
            no_default_features = true;
        } else {
            features.push(feat.to_string());
        }
    }

    BuildConfig {
        features,
        no_default_features,
        rustflags,
    }
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["build", "--workspace"]);
    cfg.apply_features(&mut cmd);
    cmd
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["test", "--workspace"]);
    cfg.apply_features(&mut cmd);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["clippy", "--all-targets", "--all-features"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(["fmt", "--all"]);
    cmd
}

/// Release run of the comparison binary; `args` are passed through.
pub fn compare_command(cfg: &BuildConfig, args: &[String]) -> Command {
    let mut cmd = Command::new("cargo");
    cfg.apply_rustflags(&mut cmd);
    cmd.args(["run", "--release", "--bin", "fftcmp"]);
    cfg.apply_features(&mut cmd);
    if !args.is_empty() {
        cmd.arg("--").args(args);
    }
    cmd
}

pub fn bench_command(cfg: &BuildConfig) -> Command {
    let mut cmd = Command::new("cargo");
    cfg.apply_rustflags(&mut cmd);
    cmd.args(["bench", "--bench", "units"]);
    cfg.apply_features(&mut cmd);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_of(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .map(|a| a.to_str().unwrap().to_string())
            .collect()
    }

    fn rustflags_of(cmd: &Command) -> Option<String> {
        cmd.get_envs()
            .find(|(k, _)| *k == "RUSTFLAGS")
            .and_then(|(_, v)| v.map(|v| v.to_str().unwrap().to_string()))
    }

    #[test]
    fn test_compute_x86_avx512() {
        let cfg = compute_config("x86_64", "flags: avx512f avx2 sse4_1", "scalar");
        assert_eq!(
            cfg.rustflags.as_deref(),
            Some("-C target-feature=+avx512f,+avx2,+fma")
        );
        assert_eq!(cfg.features, ["scalar"]);
        assert!(!cfg.no_default_features);
    }

    #[test]
    fn test_compute_x86_avx2() {
        let cfg = compute_config("x86_64", "flags: avx2", "");
        assert_eq!(
            cfg.rustflags.as_deref(),
            Some("-C target-feature=+avx2,+fma")
        );
        assert!(cfg.features_arg().is_none());
    }

    #[test]
    fn test_compute_aarch64() {
        let cfg = compute_config("arm64", "", "-default single-precision");
        assert_eq!(cfg.rustflags.as_deref(), Some("-C target-feature=+neon"));
        assert!(cfg.no_default_features);
        assert_eq!(cfg.features_arg().as_deref(), Some("single-precision"));
    }

    #[test]
    fn test_unknown_arch_has_no_rustflags() {
        let cfg = compute_config("riscv64", "", "");
        assert!(cfg.rustflags.is_none());
    }

    #[test]
    fn test_commands_include_features() {
        let cfg = compute_config("x86_64", "flags: avx2", "-default scalar");
        let args = args_of(&build_command(&cfg));
        assert!(args.contains(&"build".to_string()));
        assert!(args.contains(&"--no-default-features".to_string()));
        assert!(args.contains(&"--features".to_string()));
        assert!(args.contains(&"scalar".to_string()));
        assert!(args_of(&test_command(&cfg)).contains(&"test".to_string()));
    }

    #[test]
    fn test_compare_passes_args_through() {
        let cfg = compute_config("x86_64", "flags: avx2", "");
        let cmd = compare_command(&cfg, &["--sizes".into(), "128,1024".into()]);
        let args = args_of(&cmd);
        assert!(args.contains(&"fftcmp".to_string()));
        let sep = args.iter().position(|a| a == "--").unwrap();
        assert_eq!(&args[sep + 1..], ["--sizes", "128,1024"]);
        assert!(rustflags_of(&cmd).unwrap().contains("avx2"));

        let bare = compare_command(&cfg, &[]);
        assert!(!args_of(&bare).contains(&"--".to_string()));
    }

    #[test]
    fn test_other_commands() {
        let cfg = compute_config("x86_64", "flags: avx2", "");
        let bcmd = bench_command(&cfg);
        assert!(args_of(&bcmd).contains(&"units".to_string()));
        assert!(rustflags_of(&bcmd).is_some());
        assert!(clippy_command().get_args().any(|a| a == "clippy"));
        assert!(fmt_command().get_args().any(|a| a == "fmt"));
    }

    #[test]
    fn test_detect_functions() {
        let arch = detect_arch();
        let _flags = detect_cpu_flags();
        let cfg = detect_config();
        assert!(!arch.is_empty());
        assert!(cfg.features.iter().all(|f| !f.is_empty()));
    }
}
