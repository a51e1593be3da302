//! Startup probe: load the backend configuration and route modules, and on
//! success describe what the stack would serve once started.

use crate::check::{run_groups, Check, CheckContext, GroupSpec, Probe};
use crate::import::ImportTarget;
use crate::lang::{Lang, Text};
use crate::report::{self, RunReport};
use crate::types::run_verdict;
use crate::validate::SETTINGS_TARGET;

/// An endpoint the stack exposes once running. Declared, not discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub glyph: &'static str,
    pub method: Option<&'static str>,
    pub path: &'static str,
    pub label: Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointGroup {
    pub title: Text,
    pub endpoints: &'static [EndpointDescriptor],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupRecipe {
    pub title: Text,
    pub commands: &'static [&'static str],
}

const fn endpoint(
    glyph: &'static str,
    method: Option<&'static str>,
    path: &'static str,
    en: &'static str,
    zh_tw: &'static str,
) -> EndpointDescriptor {
    EndpointDescriptor {
        glyph,
        method,
        path,
        label: Text::new(en, zh_tw),
    }
}

pub const ENDPOINT_GROUPS: &[EndpointGroup] = &[
    EndpointGroup {
        title: Text::new("Backend API (http://localhost:8000):", "Backend API (http://localhost:8000):"),
        endpoints: &[
            endpoint("📋", Some("GET"), "/", "Root", "根端點"),
            endpoint("📋", Some("GET"), "/docs", "API docs", "API 文件"),
            endpoint("📋", Some("GET"), "/api/v1/health/", "Health check", "健康檢查"),
            endpoint("📋", Some("GET"), "/api/v1/health/live", "Liveness check", "存活檢查"),
            endpoint("📋", Some("GET"), "/api/v1/health/ready", "Readiness check", "準備檢查"),
        ],
    },
    EndpointGroup {
        title: Text::new(
            "Photo management (errors until a database is connected):",
            "照片管理端點 (未連接資料庫會顯示錯誤):",
        ),
        endpoints: &[
            endpoint("📸", Some("GET"), "/api/v1/photos", "List photos", "照片列表"),
            endpoint("📸", Some("POST"), "/api/v1/photos", "Upload photo", "上傳照片"),
            endpoint("📁", Some("GET"), "/api/v1/albums", "Albums", "相簿管理"),
            endpoint("🔍", Some("GET"), "/api/v1/search/photos", "Search photos", "搜尋照片"),
        ],
    },
    EndpointGroup {
        title: Text::new("Frontend (http://localhost:3000):", "Frontend (http://localhost:3000):"),
        endpoints: &[endpoint(
            "🎨",
            None,
            "http://localhost:3000",
            "Next.js app (requires npm start)",
            "Next.js 應用程式 (需要 npm start)",
        )],
    },
    EndpointGroup {
        title: Text::new("Monitoring:", "監控服務:"),
        endpoints: &[endpoint("🌸", None, "http://localhost:5555", "Flower (Celery)", "Flower (Celery)")],
    },
];

pub const STARTUP_RECIPES: &[StartupRecipe] = &[
    StartupRecipe {
        title: Text::new("Using Docker (recommended):", "使用 Docker (推薦):"),
        commands: &["docker-compose up -d"],
    },
    StartupRecipe {
        title: Text::new("Start the backend manually:", "手動啟動 Backend:"),
        commands: &["cd backend", "pip install -r requirements.txt", "python src/main.py"],
    },
    StartupRecipe {
        title: Text::new("Start the frontend manually:", "手動啟動 Frontend:"),
        commands: &["cd frontend", "npm install", "npm run dev"],
    },
];

const ROUTE_MODULES: &[(&str, &str, Text)] = &[
    ("health-routes", "src.api.v1.health", Text::new("Health API router", "Health API 路由")),
    ("photo-routes", "src.api.v1.photos", Text::new("Photos API router", "Photos API 路由")),
    ("album-routes", "src.api.v1.albums", Text::new("Albums API router", "Albums API 路由")),
];

const TITLE: Text = Text::new("Stack Startup Probe", "服務啟動測試");
const OK_BANNER: Text = Text::new("✅ Core infrastructure is ready!", "✅ 基礎架構準備完成！");
const FAIL_BANNER: Text = Text::new(
    "❌ Core infrastructure still has problems to fix",
    "❌ 基礎架構還有問題需要修復",
);
const ENDPOINTS_HEADER: Text = Text::new(
    "🌐 Endpoints available once services are started:",
    "🌐 目前可用的端點 (需要啟動服務):",
);
const COMMANDS_HEADER: Text = Text::new("🚀 Startup commands:", "🚀 啟動命令:");
const DEPENDENCY_NOTE: Text = Text::new(
    "⚠️  Note: the database and Redis must be set up for full functionality",
    "⚠️  注意: 需要先設定資料庫和 Redis 才能完全運作",
);
const DOCS_TIP: Text = Text::new(
    "💡 Tip: even without a database you can start the backend and browse the API docs",
    "💡 提示: 即使沒有資料庫，你也可以啟動服務查看 API 文件",
);

/// The probe's groups, in report order.
pub fn probe_groups(lang: Lang) -> Vec<GroupSpec> {
    let config_check = Check {
        id: "config-import",
        description: Text::new("Config module import", "Config 模組導入").get(lang),
        probe: Probe::Import {
            target: SETTINGS_TARGET,
            value_label: Some(Text::new("App name", "應用程式名稱").get(lang)),
        },
        fix_hint: Text::new(
            "Install backend dependencies and make sure src.config.get_settings() succeeds",
            "請先安裝 Backend 相依套件，並確認 src.config.get_settings() 可正常執行",
        )
        .get(lang),
    };

    let route_checks = ROUTE_MODULES
        .iter()
        .map(|&(id, module, description)| Check {
            id,
            description: description.get(lang),
            probe: Probe::Import {
                target: ImportTarget {
                    module,
                    symbol: "router",
                    read_attribute: None,
                },
                value_label: None,
            },
            fix_hint: Text::new(
                "The module must import cleanly and define `router`",
                "模組必須能正常導入並定義 `router`",
            )
            .get(lang),
        })
        .collect();

    vec![
        GroupSpec {
            label: Text::new("Basic Imports", "基本模組導入").get(lang),
            checks: vec![config_check],
        },
        GroupSpec {
            label: Text::new("API Structure", "API 結構").get(lang),
            checks: route_checks,
        },
    ]
}

/// Console headers for the groups returned by `probe_groups`, same order.
const GROUP_HEADERS: &[Text] = &[
    Text::new("Testing basic module imports...", "測試基本模組導入..."),
    Text::new("Testing API structure...", "測試 API 結構..."),
];

/// Static capability report: endpoints, startup commands, dependency note.
pub fn capability_report(lang: Lang) -> String {
    let mut out = String::new();

    out.push_str(&format!("\n{}\n{}\n", ENDPOINTS_HEADER.get(lang), report::rule('━')));
    for (i, group) in ENDPOINT_GROUPS.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(group.title.get(lang));
        out.push('\n');
        for ep in group.endpoints {
            match ep.method {
                Some(method) => out.push_str(&format!(
                    "  {} {}: {} {}\n",
                    ep.glyph,
                    ep.label.get(lang),
                    method,
                    ep.path
                )),
                None => out.push_str(&format!("  {} {}: {}\n", ep.glyph, ep.label.get(lang), ep.path)),
            }
        }
    }

    out.push_str(&format!("\n{}\n{}\n", COMMANDS_HEADER.get(lang), report::rule('━')));
    for (i, recipe) in STARTUP_RECIPES.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{}. {}\n", i + 1, recipe.title.get(lang)));
        for cmd in recipe.commands {
            out.push_str(&format!("   {cmd}\n"));
        }
    }
    out.push('\n');
    out.push_str(DEPENDENCY_NOTE.get(lang));
    out.push('\n');
    out
}

/// Run the startup probe and print its report. Returns the run verdict.
///
/// The capability report is only printed when every module loaded.
pub fn run_probe(ctx: &CheckContext<'_>, lang: Lang, json: bool) -> bool {
    let groups = run_groups(&probe_groups(lang), ctx);
    let passed = run_verdict(&groups);

    if json {
        report::print_json(&RunReport::new("probe", &groups));
        return passed;
    }

    println!("{}", TITLE.get(lang));
    println!("{}", report::rule('='));
    for (group, header) in groups.iter().zip(GROUP_HEADERS) {
        report::print_group(header.get(lang), group, lang);
    }

    if passed {
        println!();
        report::success_banner(OK_BANNER.get(lang));
        print!("{}", capability_report(lang));
        println!("\n{}", DOCS_TIP.get(lang));
    } else {
        println!();
        report::failure_banner(FAIL_BANNER.get(lang));
    }

    passed
}
