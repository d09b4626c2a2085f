// ==========================================
// 员工画像看板 - SQLite 数据源打开
// ==========================================
// 目标:
// - 数据源地址可以是本地路径或 http(s) URL
// - 只读打开，绝不因为路径写错而新建空库
// - 不可达/不是 SQLite/缺表 一律快速失败为 DataSourceUnavailable
// - 获取（fetch_source）异步；打开与校验（SourceFile::open）阻塞
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, OpenFlags};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::NamedTempFile;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 未配置时的数据源文件名
pub const DEFAULT_DB_FILE: &str = "hr.db";

/// 远程数据源下载上限（256MB）
pub const MAX_DOWNLOAD_LEN: u64 = 256 * 1_024 * 1_024;

/// 数据源必须具备的数据表
pub const REQUIRED_TABLES: [&str; 5] = [
    "person",
    "person_basic",
    "person_work",
    "person_education",
    "ability_score",
];

// ==========================================
// 数据源地址
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    Remote(String),
}

fn has_scheme(value: &str, scheme: &str) -> bool {
    value
        .get(..scheme.len())
        .map(|prefix| prefix.eq_ignore_ascii_case(scheme))
        .unwrap_or(false)
}

/// 是否为绝对 URL（带协议，或以 // 开头）
pub fn is_absolute_url(value: &str) -> bool {
    if value.starts_with("//") {
        return true;
    }
    match value.find("://") {
        Some(idx) if idx > 0 => {
            let scheme = &value[..idx];
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}

/// 解析最终数据源地址
///
/// # 规则
/// - 空值使用 `hr.db`
/// - 绝对 URL、绝对路径原样返回
/// - 相对路径拼接到 base_dir
pub fn resolve_location(raw: Option<&str>, base_dir: &Path) -> String {
    let candidate = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DB_FILE);

    if is_absolute_url(candidate) || candidate.starts_with('/') || Path::new(candidate).is_absolute()
    {
        return candidate.to_string();
    }

    base_dir.join(candidate).to_string_lossy().into_owned()
}

/// 区分本地/远程数据源
pub fn parse_location(location: &str) -> RepositoryResult<SourceLocation> {
    let trimmed = location.trim();
    if has_scheme(trimmed, "http://") || has_scheme(trimmed, "https://") {
        return Ok(SourceLocation::Remote(trimmed.to_string()));
    }
    if has_scheme(trimmed, "file://") {
        return Ok(SourceLocation::Local(PathBuf::from(&trimmed["file://".len()..])));
    }
    if is_absolute_url(trimmed) {
        return Err(RepositoryError::UnsupportedLocation(trimmed.to_string()));
    }
    Ok(SourceLocation::Local(PathBuf::from(trimmed)))
}

// ==========================================
// 连接
// ==========================================

/// 配置只读连接的统一 PRAGMA
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA query_only = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 只读打开 SQLite 文件（文件不存在时报错，不会新建）
pub fn open_readonly_connection(path: &Path) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 返回缺失的必需数据表
///
/// 非 SQLite 文件会在这里第一次真正读取时报错
pub fn missing_tables(conn: &Connection) -> rusqlite::Result<Vec<&'static str>> {
    let mut stmt =
        conn.prepare("SELECT 1 FROM sqlite_master WHERE type='table' AND name = ?1 LIMIT 1")?;

    let mut missing = Vec::new();
    for table in REQUIRED_TABLES {
        if !stmt.exists([table])? {
            missing.push(table);
        }
    }
    Ok(missing)
}

// ==========================================
// SourceFile - 已就位的数据源文件
// ==========================================
// 获取（可能下载）是异步的；打开与校验是阻塞的 rusqlite 调用，
// 由调用方放到阻塞线程执行
// ==========================================
pub struct SourceFile {
    location: String,
    path: PathBuf,
    // 远程数据源的本地副本，需与连接同生命周期
    download: Option<NamedTempFile>,
}

impl SourceFile {
    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn is_remote(&self) -> bool {
        self.download.is_some()
    }

    /// 只读打开并校验必需数据表（阻塞）
    ///
    /// # 返回
    /// - Ok(DataSource): 已校验必需数据表的只读连接
    /// - Err(DataSourceUnavailable): 不是 SQLite 或缺表
    pub fn open(self) -> RepositoryResult<DataSource> {
        let location = self.location.as_str();

        let conn = open_readonly_connection(&self.path)
            .map_err(|e| RepositoryError::unavailable(location, e))?;

        let missing =
            missing_tables(&conn).map_err(|e| RepositoryError::unavailable(location, e))?;
        if !missing.is_empty() {
            return Err(RepositoryError::unavailable(
                location,
                format!("缺少数据表: {}", missing.join(", ")),
            ));
        }

        tracing::info!(location, remote = self.is_remote(), "数据源已打开");

        Ok(DataSource {
            conn: Arc::new(Mutex::new(conn)),
            source: self,
        })
    }
}

// ==========================================
// DataSource - 已打开的数据源
// ==========================================
pub struct DataSource {
    conn: Arc<Mutex<Connection>>,
    // 持有临时文件直到连接释放
    source: SourceFile,
}

impl DataSource {
    pub fn location(&self) -> &str {
        self.source.location()
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }
}

/// 获取数据源文件
///
/// # 参数
/// - location: 本地路径 / file:// / http(s) URL
/// - fetch_timeout: 远程下载超时
///
/// # 返回
/// - Ok(SourceFile): 本地文件存在，或远程文件已下载到临时文件
/// - Err(DataSourceUnavailable): 地址不支持、文件不存在或下载失败
pub async fn fetch_source(location: &str, fetch_timeout: Duration) -> RepositoryResult<SourceFile> {
    let parsed = parse_location(location).map_err(|e| RepositoryError::unavailable(location, e))?;

    match parsed {
        SourceLocation::Local(path) => {
            if !path.is_file() {
                return Err(RepositoryError::unavailable(location, "文件不存在"));
            }
            Ok(SourceFile {
                location: location.to_string(),
                path,
                download: None,
            })
        }
        SourceLocation::Remote(url) => {
            let file = download_to_temp(&url, fetch_timeout, MAX_DOWNLOAD_LEN).await?;
            Ok(SourceFile {
                location: location.to_string(),
                path: file.path().to_path_buf(),
                download: Some(file),
            })
        }
    }
}

/// 下载远程数据源到临时文件
///
/// 超过 max_len 字节立即中止
async fn download_to_temp(
    url: &str,
    timeout: Duration,
    max_len: u64,
) -> RepositoryResult<NamedTempFile> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| RepositoryError::unavailable(url, format!("HTTP 客户端创建失败: {e}")))?;

    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| RepositoryError::unavailable(url, format!("无法读取数据源，请确认它可通过 HTTP 访问: {e}")))?;

    let too_large = || RepositoryError::unavailable(url, format!("数据源超过 {} 字节上限", max_len));

    if response.content_length().is_some_and(|len| len > max_len) {
        return Err(too_large());
    }

    let mut file = tempfile::Builder::new()
        .prefix("talent-board-")
        .suffix(".db")
        .tempfile()
        .map_err(|e| RepositoryError::unavailable(url, e))?;

    let mut written: u64 = 0;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| RepositoryError::unavailable(url, e))?
    {
        written += chunk.len() as u64;
        if written > max_len {
            return Err(too_large());
        }
        file.write_all(&chunk)
            .map_err(|e| RepositoryError::unavailable(url, e))?;
    }
    file.flush()
        .map_err(|e| RepositoryError::unavailable(url, e))?;

    tracing::debug!(url, bytes = written, "远程数据源已下载");
    Ok(file)
}
