/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 考生信息输入文件
    pub input_path: String,
    /// 输入文件工作表名
    pub input_sheet: String,
    /// 成绩输出文件
    pub output_path: String,
    /// 输出文件工作表名
    pub output_sheet: String,
    /// 门户配置文件路径，未设置时使用内置配置
    pub portal_file: Option<String>,
    /// 浏览器调试端口，设置后连接已运行的浏览器，否则自启无头浏览器
    pub browser_debug_port: Option<u16>,
    /// 浏览器可执行文件路径，自启模式下可指定 Edge / Chrome
    pub browser_executable: Option<String>,
    /// 表单元素等待时限（秒）
    pub wait_timeout_secs: u64,
    /// 查询提交后的固定等待（毫秒），配置了结果标志元素时不生效
    pub settle_ms: u64,
    /// 续跑模式：跳过输出文件中已有结果的考生号
    pub skip_queried: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: "考生信息.xlsx".to_string(),
            input_sheet: "Sheet1".to_string(),
            output_path: "成绩结果.xlsx".to_string(),
            output_sheet: "成绩汇总".to_string(),
            portal_file: None,
            browser_debug_port: None,
            browser_executable: None,
            wait_timeout_secs: 10,
            settle_ms: 2000,
            skip_queried: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_path: std::env::var("INPUT_EXCEL_PATH").unwrap_or(default.input_path),
            input_sheet: std::env::var("INPUT_SHEET_NAME").unwrap_or(default.input_sheet),
            output_path: std::env::var("OUTPUT_EXCEL_PATH").unwrap_or(default.output_path),
            output_sheet: std::env::var("OUTPUT_SHEET_NAME").unwrap_or(default.output_sheet),
            portal_file: std::env::var("PORTAL_FILE").ok(),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()),
            browser_executable: std::env::var("BROWSER_EXECUTABLE").ok(),
            wait_timeout_secs: std::env::var("WAIT_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.wait_timeout_secs),
            settle_ms: std::env::var("SETTLE_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.settle_ms),
            skip_queried: std::env::var("SKIP_QUERIED").ok().and_then(|v| v.parse().ok()).unwrap_or(default.skip_queried),
        }
    }
}
