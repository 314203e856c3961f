//! 内置签名表
//! 顺序即匹配顺序；名称唯一、分类非空由编译器校验

use super::category::*;
use super::model::{PatternSpec as P, Signature};

/// 构建内置签名表
pub fn builtin_signatures() -> Vec<Signature> {
    let mut table = Vec::with_capacity(48);
    table.extend(frameworks());
    table.extend(styling());
    table.extend(tooling());
    table.extend(analytics());
    table.extend(cdn());
    table.extend(libraries());
    table.extend(cms());
    table.extend(commerce());
    table.extend(hosting());
    table.extend(misc());
    table
}

fn frameworks() -> Vec<Signature> {
    vec![
        Signature::new(
            "Next.js",
            vec![
                P::contains("_next/"),
                P::regex(r"__NEXT_DATA__"),
                P::contains("_next/static"),
                P::contains("next/router"),
                P::regex(r"_?next/image"),
            ],
            95,
            &[WEB_FRAMEWORKS],
        )
        .with_exclude(vec![P::regex(r"(?i)angular(?:\.min)?\.js"), P::contains("@angular/")]),
        // Angular 不设否决：其标记足以压制其他框架
        Signature::new(
            "Angular",
            vec![
                P::regex(r"@angular/(?:core|common|platform-browser)"),
                P::contains("ng-version"),
                P::regex(r"(?i)angular(?:\.min)?\.js"),
                P::regex(r"<ng-[a-z]"),
                P::regex(r"\bng-(?:app|controller|model)="),
            ],
            95,
            &[WEB_FRAMEWORKS],
        )
        .with_version(r#"ng-version="(\d+(?:\.\d+)+)""#),
        Signature::new(
            "Vue.js",
            vec![
                P::regex(r"vue(?:\.min|\.global(?:\.prod)?|\.runtime)?\.js"),
                P::contains("__vue__"),
                P::regex(r"\bdata-v-[0-9a-f]{8}\b"),
                P::regex(r"\sv-(?:if|for|bind|model)="),
                P::regex(r"new Vue\("),
            ],
            90,
            &[WEB_FRAMEWORKS],
        )
        .with_version(r"vue@(\d+(?:\.\d+)+)")
        .with_exclude(vec![P::contains("_next/")]),
        Signature::new(
            "Svelte",
            vec![
                P::regex(r"(?i)svelte"),
                P::regex(r"\bsvelte-[a-z0-9]{5,}\b"),
                P::contains("__sveltekit"),
            ],
            95,
            &[WEB_FRAMEWORKS],
        )
        .with_exclude(vec![P::contains("_next/")]),
        Signature::new(
            "Nuxt.js",
            vec![P::contains("_nuxt/"), P::contains("__nuxt__"), P::regex(r"<nuxt-link")],
            95,
            &[WEB_FRAMEWORKS],
        ),
        Signature::new(
            "Gatsby",
            vec![
                P::contains("___gatsby"),
                P::regex(r"/page-data/[^\s]*page-data\.json"),
                P::contains("gatsby-image"),
            ],
            90,
            &[WEB_FRAMEWORKS],
        ),
        Signature::new(
            "Astro",
            vec![P::contains("astro-island"), P::regex(r"data-astro-cid-[a-z0-9]+"), P::contains("/_astro/")],
            90,
            &[WEB_FRAMEWORKS],
        ),
        Signature::new(
            "Remix",
            vec![P::contains("__remixcontext"), P::contains("__remixmanifest")],
            90,
            &[WEB_FRAMEWORKS],
        ),
        Signature::new(
            "Ember.js",
            vec![
                P::contains("ember-application"),
                P::regex(r"(?i)ember(?:\.min)?\.js"),
                P::contains("data-ember-action"),
            ],
            90,
            &[JAVASCRIPT_FRAMEWORKS],
        ),
        Signature::new(
            "Alpine.js",
            vec![P::regex(r"\sx-data="), P::contains("alpinejs"), P::regex(r"\sx-init=")],
            85,
            &[JAVASCRIPT_FRAMEWORKS],
        )
        .with_version(r"alpinejs@(\d+(?:\.\d+)+)"),
    ]
}

fn styling() -> Vec<Signature> {
    vec![
        Signature::new(
            "Tailwind CSS",
            vec![
                P::regex(r"(?i)tailwindcss"),
                P::regex(r"tailwind(?:\.min)?\.css"),
                P::regex(r#"class="[^"]*\b(?:bg|text|border)-[a-z]+-[1-9]00\b"#),
                P::regex(r#"class="[^"]*\b(?:sm|md|lg|xl):[a-z]"#),
            ],
            85,
            &[CSS_FRAMEWORKS],
        ),
        Signature::new(
            "Bootstrap",
            vec![
                P::regex(r"(?i)bootstrap(?:\.bundle)?(?:\.min)?\.(?:css|js)"),
                P::contains("btn btn-"),
                P::contains("container-fluid"),
                P::regex(r#"class="[^"]*\b(?:navbar-expand|col-(?:sm|md|lg|xl)-\d)"#),
                P::regex(r#"data-bs-toggle|data-toggle="(?:collapse|dropdown|modal)""#),
            ],
            80,
            &[CSS_FRAMEWORKS],
        )
        .with_version(r"bootstrap[@/](\d+\.\d+\.\d+)"),
        Signature::new(
            "Bulma",
            vec![
                P::regex(r"(?i)bulma(?:\.min)?\.css"),
                P::regex(r#"class="[^"]*\bis-(?:primary|info|success|danger)\b"#),
                P::regex(r#"class="[^"]*\bnavbar-burger\b"#),
            ],
            80,
            &[CSS_FRAMEWORKS],
        ),
        Signature::new(
            "Material-UI",
            vec![P::contains("@mui/"), P::regex(r"\bMui[A-Z][A-Za-z]+-root\b"), P::contains("material-ui")],
            85,
            &[UI_FRAMEWORKS],
        ),
        Signature::new(
            "Ant Design",
            vec![
                P::regex(r"\bantd\b"),
                P::contains("ant-design"),
                P::regex(r#"class="[^"]*\bant-(?:btn|layout|menu)\b"#),
            ],
            85,
            &[UI_FRAMEWORKS],
        ),
        Signature::new(
            "Chakra UI",
            vec![P::contains("@chakra-ui"), P::regex(r#"class="[^"]*\bchakra-[a-z]+"#)],
            90,
            &[UI_FRAMEWORKS],
        ),
    ]
}

fn tooling() -> Vec<Signature> {
    vec![
        Signature::new(
            "Webpack",
            vec![P::regex(r"webpackJsonp"), P::regex(r"__webpack_require__"), P::regex(r"webpackChunk")],
            90,
            &[DEVELOPMENT_TOOLS],
        ),
        Signature::new(
            "Vite",
            vec![P::contains("/@vite/client"), P::contains("__vite__"), P::contains("vite/modulepreload-polyfill")],
            90,
            &[DEVELOPMENT_TOOLS],
        ),
    ]
}

fn analytics() -> Vec<Signature> {
    vec![
        Signature::new(
            "Google Analytics",
            vec![
                P::regex(r"google-analytics\.com/(?:analytics|ga)\.js"),
                P::regex(r"\bgtag\("),
                P::regex(r"\bga\('(?:create|send)'"),
                P::regex(r"\bUA-\d{4,10}-\d{1,4}\b"),
                P::regex(r"googletagmanager\.com/gtag/js\?id=G-"),
            ],
            95,
            &[ANALYTICS],
        ),
        Signature::new(
            "Google Tag Manager",
            vec![
                P::regex(r"googletagmanager\.com/gtm\.js"),
                P::regex(r"\bGTM-[A-Z0-9]{4,8}\b"),
                P::regex(r"googletagmanager\.com/ns\.html"),
            ],
            95,
            &[ANALYTICS],
        ),
        Signature::new(
            "Facebook Pixel",
            vec![
                P::regex(r"connect\.facebook\.net/[A-Za-z_]+/fbevents\.js"),
                P::regex(r"\bfbq\("),
                P::regex(r"facebook\.com/tr\?id="),
            ],
            95,
            &[ANALYTICS],
        ),
        Signature::new(
            "Hotjar",
            vec![P::regex(r"(?i)static\.hotjar\.com"), P::regex(r"\bhjid\b"), P::contains("_hjsettings")],
            95,
            &[ANALYTICS],
        ),
        Signature::new("Plausible", vec![P::regex(r"plausible\.io/js/")], 95, &[ANALYTICS]),
    ]
}

fn cdn() -> Vec<Signature> {
    vec![
        Signature::new(
            "Cloudflare",
            vec![P::contains("/cdn-cgi/"), P::contains("__cf_bm"), P::contains("challenges.cloudflare.com")],
            90,
            &[CDN],
        ),
        Signature::new("cdnjs", vec![P::contains("cdnjs.cloudflare.com")], 95, &[CDN]),
        Signature::new("jsDelivr", vec![P::contains("cdn.jsdelivr.net")], 95, &[CDN]),
        Signature::new("unpkg", vec![P::contains("unpkg.com")], 95, &[CDN]),
    ]
}

fn libraries() -> Vec<Signature> {
    vec![
        Signature::new(
            "React",
            vec![
                P::regex(r"react(?:-dom)?\.(?:development|production\.min)\.js"),
                P::contains("react-dom"),
                P::regex(r"ReactDOM\.(?:render|createRoot|hydrate)"),
                P::regex(r"React\.createElement"),
                P::regex(r"data-reactroot|data-reactid"),
            ],
            90,
            &[JAVASCRIPT_LIBRARIES],
        )
        .with_version(r"react(?:-dom)?@(\d+(?:\.\d+)+)")
        // Next.js 自带 React 产物
        .with_exclude(vec![P::contains("_next/")]),
        Signature::new(
            "jQuery",
            vec![
                P::regex(r"(?i)jquery(?:[-.]\d+(?:\.\d+)*)?(?:\.min)?\.js"),
                P::regex(r"\bjQuery\("),
                P::regex(r"\$\(document\)\.ready"),
            ],
            85,
            &[JAVASCRIPT_LIBRARIES],
        )
        .with_version(r"(?i)jquery[-.@/]?(\d+\.\d+(?:\.\d+)?)(?:\.min)?\.js"),
        Signature::new(
            "Lodash",
            vec![P::regex(r"lodash(?:\.min)?\.js"), P::contains("lodash@"), P::regex(r"\b_\.debounce\(")],
            80,
            &[JAVASCRIPT_LIBRARIES],
        )
        .with_version(r"lodash@(\d+(?:\.\d+)+)"),
        Signature::new(
            "Axios",
            vec![P::regex(r"axios(?:\.min)?\.js"), P::contains("axios@"), P::regex(r"\baxios\.(?:get|post)\(")],
            85,
            &[JAVASCRIPT_LIBRARIES],
        )
        .with_version(r"axios@(\d+(?:\.\d+)+)"),
        Signature::new(
            "Three.js",
            vec![
                P::regex(r"three(?:\.module)?(?:\.min)?\.js"),
                P::regex(r"THREE\.(?:WebGLRenderer|Scene|PerspectiveCamera)"),
                P::contains("three@"),
            ],
            90,
            &[JAVASCRIPT_LIBRARIES],
        )
        .with_version(r"three@(\d+(?:\.\d+)+)"),
        Signature::new(
            "GSAP",
            vec![
                P::regex(r"(?i)gsap(?:\.min)?\.js"),
                P::regex(r"TweenMax|TimelineMax"),
                P::regex(r"\bgsap\.(?:to|from|timeline)\("),
            ],
            90,
            &[JAVASCRIPT_LIBRARIES],
        )
        .with_version(r"gsap@(\d+(?:\.\d+)+)"),
        Signature::new(
            "Framer Motion",
            vec![P::contains("framer-motion"), P::contains("data-projection-id")],
            85,
            &[JAVASCRIPT_LIBRARIES],
        ),
        Signature::new(
            "Turbo",
            vec![P::regex(r"\sdata-turbo(?:-[a-z]+)?="), P::contains("<turbo-frame"), P::contains("@hotwired/turbo")],
            85,
            &[JAVASCRIPT_LIBRARIES],
        ),
        Signature::new(
            "HTMX",
            vec![
                P::regex(r"\shx-(?:get|post|put|delete|trigger|swap)="),
                P::contains("htmx.org"),
                P::regex(r"htmx(?:\.min)?\.js"),
            ],
            85,
            &[JAVASCRIPT_LIBRARIES],
        )
        .with_version(r"htmx\.org@(\d+(?:\.\d+)+)"),
    ]
}

fn cms() -> Vec<Signature> {
    vec![
        Signature::new(
            "WordPress",
            vec![
                P::regex(r"wp-(?:content|includes)/"),
                P::regex(r"wp-(?:content/(?:themes|plugins|uploads)|includes/(?:js|css|blocks))/"),
            ],
            95,
            &[CMS],
        )
        .with_version(r#"(?i)content="WordPress (\d+(?:\.\d+)+)""#),
        Signature::new(
            "Drupal",
            vec![
                P::regex(r"(?i)drupal"),
                P::regex(r"sites/(?:default|all)/(?:files|themes|modules)"),
                P::regex(r"drupal-settings-json|Drupal\.settings"),
            ],
            95,
            &[CMS],
        )
        .with_version(r#"(?i)content="Drupal (\d+)"#),
        Signature::new(
            "Joomla",
            vec![P::regex(r"(?i)joomla"), P::contains("/components/com_"), P::contains("/modules/mod_")],
            95,
            &[CMS],
        )
        .with_version(r#"(?i)content="Joomla! (\d+(?:\.\d+)*)"#),
        Signature::new(
            "Ghost",
            vec![P::regex(r#"(?i)<meta name="generator" content="Ghost"#), P::contains("/ghost/api/")],
            95,
            &[CMS],
        )
        .with_version(r#"(?i)content="Ghost (\d+(?:\.\d+)*)"#),
    ]
}

fn commerce() -> Vec<Signature> {
    vec![
        Signature::new(
            "Shopify",
            vec![
                P::contains("cdn.shopify.com"),
                P::regex(r"\.myshopify\.com"),
                P::regex(r"Shopify\.(?:shop|theme)"),
                P::regex(r"(?i)shopify"),
            ],
            95,
            &[ECOMMERCE],
        ),
        Signature::new(
            "WooCommerce",
            vec![
                P::regex(r"(?i)woocommerce"),
                P::contains("wp-content/plugins/woocommerce"),
                P::regex(r"\bwc-(?:block|cart|ajax)"),
            ],
            95,
            &[ECOMMERCE],
        ),
        Signature::new(
            "Magento",
            vec![P::regex(r"Mage\.Cookies"), P::regex(r"/static/version\d+/frontend/"), P::regex(r"(?i)magento")],
            90,
            &[ECOMMERCE],
        ),
    ]
}

fn hosting() -> Vec<Signature> {
    vec![
        Signature::new(
            "Vercel",
            vec![
                P::regex(r"(?i)vercel"),
                P::regex(r"\.vercel\.app"),
                P::regex(r"/_vercel/(?:insights|speed-insights)"),
                P::contains("__vercel"),
            ],
            90,
            &[PAAS],
        ),
        Signature::new(
            "Netlify",
            vec![
                P::regex(r"(?i)netlify"),
                P::regex(r"\.netlify\.app"),
                P::contains("/.netlify/"),
                P::contains("__netlify"),
            ],
            90,
            &[PAAS],
        ),
        Signature::new("GitHub Pages", vec![P::regex(r"[a-z0-9-]+\.github\.io")], 80, &[PAAS]),
        Signature::new(
            "Firebase",
            vec![
                P::contains("firebaseio.com"),
                P::regex(r"firebase(?:-app)?(?:-compat)?(?:\.min)?\.js"),
                P::contains("firebasestorage.googleapis.com"),
            ],
            85,
            &[DATABASES],
        ),
        Signature::new(
            "Supabase",
            vec![P::regex(r"[a-z0-9]+\.supabase\.co"), P::contains("@supabase/supabase-js")],
            85,
            &[DATABASES],
        ),
    ]
}

fn misc() -> Vec<Signature> {
    vec![
        Signature::new(
            "reCAPTCHA",
            vec![P::contains("google.com/recaptcha"), P::contains("g-recaptcha"), P::regex(r"\bgrecaptcha\.")],
            95,
            &[SECURITY],
        ),
        Signature::new(
            "HubSpot",
            vec![P::contains("js.hs-scripts.com"), P::contains("js.hsforms.net"), P::regex(r"\b_hsq\.push")],
            90,
            &[MARKETING_AUTOMATION],
        ),
        Signature::new(
            "Mailchimp",
            vec![P::contains("chimpstatic.com"), P::contains("list-manage.com")],
            90,
            &[MARKETING_AUTOMATION],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_builtin_names_unique() {
        let table = builtin_signatures();
        let mut seen = FxHashSet::default();
        for sig in &table {
            assert!(seen.insert(sig.name.as_str()), "duplicate signature: {}", sig.name);
        }
    }

    #[test]
    fn test_builtin_records_well_formed() {
        for sig in builtin_signatures() {
            assert!(!sig.categories.is_empty(), "{} has no category", sig.name);
            assert!(!sig.patterns.is_empty(), "{} has no pattern", sig.name);
            assert!(sig.confidence <= 100, "{} confidence out of range", sig.name);
        }
    }

    #[test]
    fn test_folded_scanner_entries_present() {
        let table = builtin_signatures();
        for name in ["Turbo", "Alpine.js", "HTMX"] {
            assert!(table.iter().any(|s| s.name == name), "missing {}", name);
        }
    }
}
