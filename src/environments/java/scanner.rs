use super::probe::{CommandRunner, SystemCommandRunner};
use super::validator::JavaValidator;
use super::version_manager::VersionConstraint;
use crate::core::constants::{env, launcher, layout};
use crate::utils::PathUtils;
use std::path::{Path, PathBuf};

/// 环境变量查询函数
pub type EnvLookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// 一次查找的参数
struct LocateRequest<'a> {
    constraint: &'a VersionConstraint,
    executable: &'a str,
    install_dir: &'a Path,
}

type LocateStep<C> = fn(&JavaScanner<C>, &LocateRequest<'_>) -> Option<PathBuf>;

/// Java 安装查找器
///
/// 依次检查启动器自带运行时、`JAVA_HOME`、PATH 中的命令和之前下载的运行时，
/// 命中第一个满足约束的位置即返回。
pub struct JavaScanner<C: CommandRunner = SystemCommandRunner> {
    validator: JavaValidator<C>,
    env: EnvLookup,
    launcher_roots: Option<Vec<PathBuf>>,
}

impl JavaScanner<SystemCommandRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemCommandRunner)
    }
}

impl Default for JavaScanner<SystemCommandRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CommandRunner> JavaScanner<C> {
    pub fn with_runner(runner: C) -> Self {
        Self {
            validator: JavaValidator::with_runner(runner),
            env: Box::new(|key| std::env::var(key).ok()),
            launcher_roots: None,
        }
    }

    /// 替换环境变量来源
    pub fn with_env<F>(mut self, env_fn: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Box::new(env_fn);
        self
    }

    /// 覆盖启动器运行时的搜索根目录
    pub fn with_launcher_roots(mut self, roots: Vec<PathBuf>) -> Self {
        self.launcher_roots = Some(roots);
        self
    }

    pub fn validator(&self) -> &JavaValidator<C> {
        &self.validator
    }

    /// 查找满足约束的 Java 可执行文件，找不到时返回 `None`
    pub fn locate(
        &self,
        constraint: &VersionConstraint,
        executable: &str,
        install_dir: &Path,
    ) -> Option<PathBuf> {
        let request = LocateRequest {
            constraint,
            executable,
            install_dir,
        };

        let steps: [(&str, LocateStep<C>); 4] = [
            ("launcher", Self::from_launcher_runtimes),
            ("JAVA_HOME", Self::from_java_home),
            ("PATH", Self::from_path),
            ("installed", Self::from_installed_runtime),
        ];

        let found = steps.iter().find_map(|(name, step)| {
            let found = step(self, &request)?;
            tracing::debug!("通过 {} 找到 Java: {}", name, found.display());
            Some(found)
        });

        if found.is_none() {
            tracing::debug!("未找到满足约束的 Java: {:?}", constraint);
        }
        found
    }

    /// 启动器运行时的根目录；默认只在 Windows 上搜索
    fn launcher_roots(&self) -> Vec<PathBuf> {
        if let Some(roots) = &self.launcher_roots {
            return roots.clone();
        }
        if !cfg!(target_os = "windows") {
            return Vec::new();
        }

        let mut roots = vec![PathBuf::from(launcher::PROGRAM_FILES_ROOT)];
        match (self.env)(env::LOCAL_APP_DATA) {
            Some(local) if !local.is_empty() => {
                let mut root = PathBuf::from(local);
                root.extend(launcher::PACKAGE_CACHE_SUBPATH);
                roots.push(root);
            }
            _ => tracing::debug!("{} 未设置，跳过商店版启动器目录", env::LOCAL_APP_DATA),
        }
        roots
    }

    fn from_launcher_runtimes(&self, request: &LocateRequest<'_>) -> Option<PathBuf> {
        let file_name = PathUtils::executable_file_name(request.executable);
        self.launcher_roots().iter().find_map(|root| {
            launcher::RUNTIME_LAYOUTS.iter().find_map(|layout| {
                let mut bin = root.clone();
                bin.extend(layout.iter());
                if !bin.is_dir() {
                    return None;
                }
                self.validator
                    .is_valid(&bin, request.constraint, request.executable)
                    .then(|| bin.join(&file_name))
            })
        })
    }

    fn from_java_home(&self, request: &LocateRequest<'_>) -> Option<PathBuf> {
        let home = (self.env)(env::JAVA_HOME).filter(|h| !h.is_empty())?;
        let home = PathBuf::from(home);

        // 校验的是 JAVA_HOME 目录本身，返回的却是 bin 下的可执行文件
        self.validator
            .is_valid(&home, request.constraint, request.executable)
            .then(|| {
                home.join(layout::BIN_DIR)
                    .join(PathUtils::executable_file_name(request.executable))
            })
    }

    fn from_path(&self, request: &LocateRequest<'_>) -> Option<PathBuf> {
        self.validator
            .is_valid(Path::new(""), request.constraint, request.executable)
            .then(|| PathBuf::from(PathUtils::executable_file_name(request.executable)))
    }

    fn from_installed_runtime(&self, request: &LocateRequest<'_>) -> Option<PathBuf> {
        let bin = PathUtils::runtime_bin(request.install_dir, request.constraint.optimal);
        self.validator
            .is_valid(&bin, request.constraint, request.executable)
            .then(|| bin.join(PathUtils::executable_file_name(request.executable)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::probe::testing::FakeRunner;
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    fn java_name() -> String {
        PathUtils::executable_file_name("java")
    }

    fn touch_java(bin: &Path) -> PathBuf {
        std::fs::create_dir_all(bin).unwrap();
        let path = bin.join(java_name());
        std::fs::write(&path, "").unwrap();
        path
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + Send + Sync + 'static {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    fn scanner(runner: FakeRunner) -> JavaScanner<FakeRunner> {
        JavaScanner::with_runner(runner)
            .with_env(env_from(&[]))
            .with_launcher_roots(Vec::new())
    }

    #[test]
    fn test_nothing_found() {
        let temp = TempDir::new().unwrap();
        let scanner = scanner(FakeRunner::default());
        assert_eq!(scanner.locate(&VersionConstraint::exact(17), "java", temp.path()), None);
    }

    #[test]
    fn test_path_command() {
        let temp = TempDir::new().unwrap();
        let scanner = scanner(FakeRunner::default().with_version(java_name(), "17"));

        let found = scanner.locate(&VersionConstraint::exact(17), "java", temp.path());
        assert_eq!(found, Some(PathBuf::from(java_name())));

        // 版本不符时继续往后找，最终找不到
        assert_eq!(scanner.locate(&VersionConstraint::exact(21), "java", temp.path()), None);
    }

    #[test]
    fn test_installed_runtime() {
        let temp = TempDir::new().unwrap();
        let java = touch_java(&temp.path().join("java-21").join("bin"));
        let scanner = scanner(FakeRunner::default().with_version(&java, "21"));

        let found = scanner.locate(&VersionConstraint::exact(21), "java", temp.path());
        assert_eq!(found, Some(java));
    }

    #[test]
    fn test_path_takes_precedence_over_installed_runtime() {
        let temp = TempDir::new().unwrap();
        let installed = touch_java(&temp.path().join("java-17").join("bin"));
        let scanner = scanner(
            FakeRunner::default()
                .with_version(java_name(), "17")
                .with_version(&installed, "17"),
        );

        let found = scanner.locate(&VersionConstraint::exact(17), "java", temp.path());
        assert_eq!(found, Some(PathBuf::from(java_name())));
        assert!(!scanner.validator().probe().runner().calls.lock().unwrap().contains(&installed));
    }

    #[test]
    fn test_java_home_validates_home_and_returns_bin() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("jdk-17");
        std::fs::create_dir_all(&home).unwrap();
        let home_for_predicate = home.clone();
        let constraint = VersionConstraint::custom(17, move |dir, _| dir == home_for_predicate);

        let scanner = JavaScanner::with_runner(FakeRunner::default())
            .with_env(env_from(&[("JAVA_HOME", home.to_str().unwrap())]))
            .with_launcher_roots(Vec::new());

        let found = scanner.locate(&constraint, "java", temp.path());
        assert_eq!(found, Some(home.join("bin").join(java_name())));
    }

    #[test]
    fn test_java_home_probes_home_directory_itself() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("jdk-17");
        let bin_java = touch_java(&home.join("bin"));
        let scanner = JavaScanner::with_runner(FakeRunner::default().with_version(&bin_java, "17"))
            .with_env(env_from(&[("JAVA_HOME", home.to_str().unwrap())]))
            .with_launcher_roots(Vec::new());

        // 只有 bin 下有 java 时 JAVA_HOME 这一步不会命中
        assert_eq!(scanner.locate(&VersionConstraint::exact(17), "java", temp.path()), None);

        let home_java = touch_java(&home);
        let scanner = JavaScanner::with_runner(FakeRunner::default().with_version(&home_java, "17"))
            .with_env(env_from(&[("JAVA_HOME", home.to_str().unwrap())]))
            .with_launcher_roots(Vec::new());
        assert_eq!(
            scanner.locate(&VersionConstraint::exact(17), "java", temp.path()),
            Some(bin_java)
        );
    }

    #[test]
    fn test_launcher_runtime_layout_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("Minecraft Launcher");
        let gamma_bin = root
            .join("runtime")
            .join("java-runtime-gamma")
            .join("windows-x64")
            .join("java-runtime-gamma")
            .join("bin");
        let legacy_bin = root
            .join("runtime")
            .join("jre-legacy")
            .join("windows-x64")
            .join("jre-legacy")
            .join("bin");
        let gamma = touch_java(&gamma_bin);
        let legacy = touch_java(&legacy_bin);

        let scanner = JavaScanner::with_runner(
            FakeRunner::default()
                .with_version(&gamma, "21")
                .with_version(&legacy, "8")
                .with_version(java_name(), "21"),
        )
        .with_env(env_from(&[]))
        .with_launcher_roots(vec![root]);

        // jre-legacy 排在 gamma 之前，但版本不符
        let found = scanner.locate(&VersionConstraint::exact(21), "java", temp.path());
        assert_eq!(found, Some(gamma));

        let found = scanner.locate(&VersionConstraint::bounded(8, None, Some(8)), "java", temp.path());
        assert_eq!(found, Some(legacy));
    }

    #[test]
    fn test_custom_predicate_sees_each_candidate_in_order() {
        let temp = TempDir::new().unwrap();
        let seen: Arc<Mutex<Vec<PathBuf>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let constraint = VersionConstraint::custom(11, move |dir, _| {
            sink.lock().unwrap().push(dir.to_path_buf());
            false
        });

        let scanner = JavaScanner::with_runner(FakeRunner::default())
            .with_env(env_from(&[("JAVA_HOME", "/opt/jdk")]))
            .with_launcher_roots(Vec::new());
        assert_eq!(scanner.locate(&constraint, "java", temp.path()), None);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                PathBuf::from("/opt/jdk"),
                PathBuf::new(),
                temp.path().join("java-11").join("bin"),
            ]
        );
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_default_launcher_roots_on_windows() {
        let with_local = JavaScanner::new().with_env(env_from(&[("LOCALAPPDATA", r"C:\Users\me\AppData\Local")]));
        assert_eq!(with_local.launcher_roots().len(), 2);

        let without_local = JavaScanner::new().with_env(env_from(&[]));
        assert_eq!(
            without_local.launcher_roots(),
            vec![PathBuf::from(launcher::PROGRAM_FILES_ROOT)]
        );
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_no_default_launcher_roots_elsewhere() {
        let scanner = JavaScanner::new().with_env(env_from(&[("LOCALAPPDATA", "/tmp")]));
        assert!(scanner.launcher_roots().is_empty());
    }
}
