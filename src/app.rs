use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::SqlitePool;
use tokio::{net::TcpListener, sync::broadcast};
use tracing::{debug, info};
use zendo_api::{create_app, API_ENDPOINTS};
use zendo_core::{traits::TaskRepository, AppConfig, WeekClock};
use zendo_infrastructure::{MigrationReport, SqliteTaskRepository};

/// 主应用程序
pub struct Application {
    config: AppConfig,
    clock: Arc<WeekClock>,
    pool: SqlitePool,
    router: Router,
    migration_report: MigrationReport,
}

impl Application {
    /// 创建存储目录、打开数据库、执行迁移并构建路由，任何一步失败都直接返回错误
    pub async fn new(config: AppConfig) -> Result<Self> {
        let clock = Arc::new(config.time.clock());
        Self::with_clock(config, clock).await
    }

    pub async fn with_clock(config: AppConfig, clock: Arc<WeekClock>) -> Result<Self> {
        info!("初始化应用程序");
        config.validate().context("配置验证失败")?;
        log_timezone(&clock);

        let (repository, migration_report) = SqliteTaskRepository::open(&config.database, &clock)
            .await
            .context("初始化数据库失败")?;
        log_migration(&migration_report);

        let pool = repository.pool().clone();
        let task_repo: Arc<dyn TaskRepository> = Arc::new(repository);
        let router = create_app(task_repo, Arc::clone(&clock), &config.api, &config.frontend);

        Ok(Self {
            config,
            clock,
            pool,
            router,
            migration_report,
        })
    }

    pub fn clock(&self) -> &WeekClock {
        &self.clock
    }

    pub fn migration_report(&self) -> MigrationReport {
        self.migration_report
    }

    /// 绑定配置的监听地址并运行，直到收到关闭信号
    pub async fn run(&self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        let listener = TcpListener::bind(&self.config.api.bind_address)
            .await
            .with_context(|| format!("绑定地址失败: {}", self.config.api.bind_address))?;

        self.serve(listener, shutdown_rx).await
    }

    /// 在已绑定的监听器上运行
    pub async fn serve(
        &self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<()> {
        let addr: SocketAddr = listener.local_addr().context("获取监听地址失败")?;
        self.log_startup(addr);

        axum::serve(listener, self.router.clone())
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
                info!("API服务器收到关闭信号");
            })
            .await
            .context("API服务器运行失败")?;

        self.pool.close().await;
        info!("API服务器已停止");
        Ok(())
    }

    fn log_startup(&self, addr: SocketAddr) {
        info!("API服务器启动在 http://{}", addr);
        info!("允许的CORS来源: {:?}", self.config.api.allowed_origins());
        if self.config.frontend.enabled {
            info!("前端静态资源目录: {}", self.config.frontend.static_dir.display());
        }
        for endpoint in API_ENDPOINTS {
            info!("  {}", endpoint);
        }
    }
}

fn log_timezone(clock: &WeekClock) {
    let snapshot = clock.snapshot();
    info!(
        timezone = %snapshot.timezone,
        offset = %snapshot.timezone_offset,
        "时区: {}，当前UTC时间: {}，当地时间: {}",
        snapshot.timezone,
        snapshot.current_utc_time,
        snapshot.current_local_time
    );
    debug!("当前周: {}，今天: {}", clock.current_week(), clock.today());
}

fn log_migration(report: &MigrationReport) {
    if report.is_noop() {
        info!("数据库结构已是最新");
        return;
    }

    info!(
        week_date_added = report.week_date_added,
        tags_added = report.tags_added,
        "数据库迁移完成，回填 week_date {} 条，tags {} 条",
        report.week_date_backfilled,
        report.tags_backfilled
    );
}
