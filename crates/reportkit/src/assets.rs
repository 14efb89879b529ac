//! Stylesheet and client script embedded into every generated document.

/// Idle text of a card's copy-status indicator.
pub const COPY_HINT: &str = "Right-click to copy";

pub const STYLESHEET: &str = r#"
:root {
    --accent: #3b82f6;
    --text: #1f2937;
    --muted: #6b7280;
    --border: #e5e7eb;
    --card: #ffffff;
    --page: #f3f4f6;
}
* { box-sizing: border-box; }
body {
    margin: 0;
    font-family: -apple-system, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
    color: var(--text);
    background: var(--page);
}
.report-container { max-width: 1100px; margin: 0 auto; padding: 24px; }
.report-header {
    background: linear-gradient(135deg, #1e3a8a, var(--accent));
    color: #fff;
    padding: 32px;
    border-radius: 10px;
    margin-bottom: 24px;
}
.report-header h1 { margin: 0 0 8px 0; font-size: 2em; }
.report-header .subtitle { margin: 0; opacity: 0.85; }
.executive-summary, .report-section {
    background: var(--card);
    border: 1px solid var(--border);
    border-radius: 10px;
    padding: 24px;
    margin-bottom: 24px;
}
.report-section h2, .executive-summary h2 { margin-top: 0; }
.section-subtitle { color: var(--muted); margin-top: -8px; }
.chart-card {
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 16px;
    margin: 16px 0;
    overflow-x: auto;
}
.chart-title { margin: 0 0 12px 0; font-size: 1.1em; }
.chart-actions { text-align: right; font-size: 0.8em; color: var(--muted); }
.copy-status.success { color: #059669; }
.copy-status.failure { color: #dc2626; }
.chart-error {
    padding: 16px;
    background: #fef2f2;
    color: #991b1b;
    border: 1px dashed #fca5a5;
    border-radius: 6px;
}
.plot-target { width: 100%; position: relative; }
.plot-placeholder {
    display: flex;
    align-items: center;
    justify-content: center;
    height: 100%;
    color: var(--muted);
    background: #f9fafb;
    border-radius: 6px;
}
.content-block { margin: 12px 0; line-height: 1.55; }
.content-finding {
    border-left: 4px solid var(--accent);
    background: #eff6ff;
    padding: 12px 16px;
    border-radius: 0 6px 6px 0;
}
.content-recommendation {
    border-left: 4px solid #10b981;
    background: #ecfdf5;
    padding: 12px 16px;
    border-radius: 0 6px 6px 0;
}
.block-label { font-weight: 700; margin-right: 8px; }
.priority-badge {
    display: inline-block;
    padding: 1px 8px;
    border-radius: 10px;
    font-size: 0.75em;
    text-transform: uppercase;
    color: #fff;
    background: #6b7280;
}
.priority-high { background: #dc2626; }
.priority-medium { background: #f59e0b; }
.priority-low { background: #10b981; }
.report-table { border-collapse: collapse; width: 100%; }
.report-table th, .report-table td { padding: 6px 10px; border-bottom: 1px solid var(--border); text-align: left; }
.report-table th { background: #f9fafb; }
.report-table td.num { text-align: right; font-variant-numeric: tabular-nums; }
.report-footer { text-align: center; color: var(--muted); font-size: 0.85em; padding: 16px; }
"#;

/// Loads plotly.js once, on demand, draws every embedded figure and wires
/// right-click copy. A figure whose library cannot load is replaced by a
/// `.chart-error` placeholder.
pub const SCRIPT: &str = r#"
(function () {
    var plotly = { initialized: false, failed: false, waiting: [] };

    function settle(ok) {
        plotly.failed = !ok;
        var waiting = plotly.waiting;
        plotly.waiting = [];
        waiting.forEach(function (done) { done(ok); });
    }

    function withPlotly(done) {
        if (window.Plotly) { done(true); return; }
        if (plotly.failed) { done(false); return; }
        plotly.waiting.push(done);
        if (plotly.initialized) return;
        plotly.initialized = true;
        var script = document.createElement('script');
        script.src = document.body.getAttribute('data-plotly-src');
        script.async = true;
        script.onload = function () {
            if (!window.Plotly) console.error('[ReportKit] plotly.js loaded but Plotly is undefined');
            settle(!!window.Plotly);
        };
        script.onerror = function () {
            console.error('[ReportKit] could not load plotly.js from ' + script.src);
            settle(false);
        };
        document.head.appendChild(script);
    }

    function unavailable(target) {
        var note = document.createElement('div');
        note.className = 'chart-error';
        note.textContent = 'Chart unavailable: the charting library could not be loaded.';
        target.replaceWith(note);
    }

    function drawSurface(surface) {
        var target = surface.querySelector('.plot-target');
        var source = surface.querySelector('script.plot-spec');
        if (!target || !source) return;
        var spec;
        try {
            spec = JSON.parse(source.textContent);
        } catch (err) {
            console.error('[ReportKit] ' + surface.id + ': unreadable figure', err);
            unavailable(target);
            return;
        }
        withPlotly(function (ok) {
            if (!ok) { unavailable(target); return; }
            target.innerHTML = '';
            Plotly.newPlot(target, spec.data || [], spec.layout || {}, { responsive: true, displaylogo: false })
                .catch(function (err) {
                    console.error('[ReportKit] ' + surface.id + ': drawing failed', err);
                    unavailable(target);
                });
        });
    }

    Array.prototype.forEach.call(document.querySelectorAll('.chart-surface'), drawSurface);

    function setStatus(surface, text, cls) {
        var card = surface.closest('.chart-card');
        var status = card ? card.querySelector('.copy-status') : null;
        if (!status) return;
        status.textContent = text;
        status.className = 'copy-status ' + cls;
        setTimeout(function () {
            status.textContent = status.getAttribute('data-idle');
            status.className = 'copy-status';
        }, 2000);
    }

    function download(blob, name) {
        var a = document.createElement('a');
        a.href = URL.createObjectURL(blob);
        a.download = name;
        document.body.appendChild(a);
        a.click();
        a.remove();
        setTimeout(function () { URL.revokeObjectURL(a.href); }, 1000);
    }

    function tableToTsv(table) {
        return Array.prototype.map.call(table.rows, function (row) {
            return Array.prototype.map.call(row.cells, function (c) {
                return c.textContent.trim();
            }).join('\t');
        }).join('\n');
    }

    function copyChart(surface) {
        var figure = surface.querySelector('.js-plotly-plot');
        if (!figure || !window.Plotly) return Promise.reject(new Error('nothing to copy'));
        return Plotly.toImage(figure, { format: 'png', scale: 2 })
            .then(function (url) { return fetch(url); })
            .then(function (res) { return res.blob(); })
            .then(function (blob) {
                if (!navigator.clipboard || !window.ClipboardItem) {
                    download(blob, surface.id + '.png');
                    return 'Downloaded PNG';
                }
                return navigator.clipboard.write([new ClipboardItem({ 'image/png': blob })])
                    .then(function () { return 'Copied chart'; })
                    .catch(function () {
                        download(blob, surface.id + '.png');
                        return 'Downloaded PNG';
                    });
            });
    }

    function copyTable(surface) {
        var table = surface.querySelector('table');
        if (!table) return Promise.reject(new Error('nothing to copy'));
        if (!navigator.clipboard || !window.ClipboardItem) {
            return Promise.reject(new Error('clipboard unavailable'));
        }
        var item = new ClipboardItem({
            'text/plain': new Blob([tableToTsv(table)], { type: 'text/plain' }),
            'text/html': new Blob([table.outerHTML], { type: 'text/html' })
        });
        return navigator.clipboard.write([item]).then(function () { return 'Copied table'; });
    }

    document.addEventListener('contextmenu', function (e) {
        var surface = e.target.closest ? e.target.closest('.surface') : null;
        if (!surface) return;
        e.preventDefault();
        if (surface.dataset.busy === '1') return;
        surface.dataset.busy = '1';
        var job = surface.dataset.surfaceKind === 'table' ? copyTable(surface) : copyChart(surface);
        job.then(function (msg) { setStatus(surface, msg, 'success'); })
            .catch(function (err) { setStatus(surface, 'Copy failed: ' + err.message, 'failure'); })
            .then(function () { surface.dataset.busy = '0'; });
    });
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_classes_have_style_rules() {
        for class in [".plot-target", ".plot-placeholder", ".chart-error", ".report-table", ".copy-status"] {
            assert!(STYLESHEET.contains(class), "no rule for {}", class);
        }
        assert!(!STYLESHEET.contains("svg.chart"));
    }

    #[test]
    fn plotly_is_loaded_once_and_failures_fall_back() {
        assert_eq!(SCRIPT.matches("document.createElement('script')").count(), 1);
        assert!(SCRIPT.contains("if (plotly.initialized) return;"));
        assert!(SCRIPT.contains("script.onerror"));
        assert!(SCRIPT.contains("note.className = 'chart-error'"));
    }

    #[test]
    fn charts_are_copied_through_plotly() {
        assert!(SCRIPT.contains("Plotly.toImage"));
        assert!(!SCRIPT.contains("XMLSerializer"));
    }
}
