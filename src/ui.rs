use crate::models::{Metric, Timeframe};

pub fn render_index(timeframe: Timeframe, metric: Metric) -> String {
    INDEX_HTML
        .replace("{{VIEW}}", timeframe.as_str())
        .replace("{{GRAPH_TYPE}}", metric.as_str())
        .replace("{{CHART_TITLE}}", &metric.title())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Taxi Ride Dashboard</title>
  <style>
    :root {
      --bg: #f4f6f8;
      --ink: #1f2933;
      --muted: #616e7c;
      --card: #ffffff;
      --line: rgba(31, 41, 51, 0.1);
      --shadow: 0 12px 32px rgba(31, 41, 51, 0.08);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Segoe UI", "Helvetica Neue", sans-serif;
      padding: 24px;
    }

    .app {
      max-width: 980px;
      margin: 0 auto;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-size: 1.6rem;
      margin: 0;
    }

    .controls {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
    }

    label {
      display: block;
      font-weight: 600;
      margin-bottom: 8px;
    }

    select {
      width: 100%;
      border: 1px solid var(--line);
      border-radius: 8px;
      padding: 8px 12px;
      font-size: 1rem;
      background: var(--card);
    }

    .routes {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    .route {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 16px;
      box-shadow: var(--shadow);
    }

    .route h2 {
      font-size: 1rem;
      margin: 0 0 6px;
    }

    .route p,
    .empty {
      margin: 0;
      color: var(--muted);
    }

    .chart-card {
      background: var(--card);
      border: 1px solid var(--line);
      border-radius: 10px;
      padding: 20px;
      box-shadow: var(--shadow);
    }

    .chart-card h2 {
      font-size: 1.1rem;
      margin: 0 0 12px;
    }

    #chart {
      width: 100%;
      height: 300px;
      display: block;
    }

    .chart-grid {
      stroke: var(--line);
    }

    .chart-label {
      fill: var(--muted);
      font-size: 11px;
    }

    .status {
      min-height: 1.2em;
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Taxi Ride Dashboard</h1>

    <section class="controls">
      <div>
        <label for="timeframe">Select Timeframe:</label>
        <select id="timeframe">
          <option value="weekly">Weekly</option>
          <option value="monthly">Monthly</option>
        </select>
      </div>
      <div>
        <label for="graphType">Select Graph Type:</label>
        <select id="graphType">
          <option value="rides">Number of Rides</option>
          <option value="highest">Highest Taxi Price</option>
          <option value="lowest">Lowest Taxi Price</option>
          <option value="average">Average Taxi Price</option>
        </select>
      </div>
    </section>

    <section class="routes" id="routes"></section>

    <section class="chart-card">
      <h2 id="chart-title">{{CHART_TITLE}}</h2>
      <svg id="chart" viewBox="0 0 800 300" aria-label="Daily chart" role="img"></svg>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const timeframeEl = document.getElementById('timeframe');
    const graphTypeEl = document.getElementById('graphType');
    const routesEl = document.getElementById('routes');
    const chartEl = document.getElementById('chart');
    const chartTitleEl = document.getElementById('chart-title');
    const statusEl = document.getElementById('status');

    timeframeEl.value = '{{VIEW}}';
    graphTypeEl.value = '{{GRAPH_TYPE}}';

    const escapeHtml = (text) =>
      text.replace(/[&<>"']/g, (ch) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' })[ch]);

    const renderRoutes = (averages) => {
      if (!averages.length) {
        routesEl.innerHTML = '<p class="empty">No data available for the selected timeframe.</p>';
        return;
      }
      routesEl.innerHTML = averages
        .map((avg) => `<div class="route"><h2>${escapeHtml(avg.route)}</h2><p>Average Income: &#8377;${avg.average}</p></div>`)
        .join('');
    };

    const formatAxisValue = (value) => {
      const rounded = Math.round(value * 10) / 10;
      return Number.isInteger(rounded) ? rounded.toString() : rounded.toFixed(1);
    };

    const renderBarChart = (chart) => {
      const dataset = chart.datasets[0];
      if (!chart.labels.length || !dataset) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No data yet</text>';
        return;
      }

      const width = 800;
      const height = 300;
      const paddingX = 48;
      const paddingY = 40;
      const top = 20;

      const max = Math.max(...dataset.data, 0) || 1;
      const slot = (width - paddingX * 2) / chart.labels.length;
      const barWidth = Math.max(slot * 0.7, 1);
      const scaleY = (height - top - paddingY) / max;
      const y = (value) => height - paddingY - value * scaleY;

      const ticks = 4;
      let grid = '';
      for (let i = 0; i <= ticks; i += 1) {
        const value = (max * i) / ticks;
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(value)}" x2="${width - paddingX}" y2="${y(value)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(value) + 4}" text-anchor="end">${formatAxisValue(value)}</text>`;
      }

      const labelEvery = Math.ceil(chart.labels.length / 12);
      const bars = chart.labels
        .map((label, index) => {
          const value = dataset.data[index];
          const x = paddingX + index * slot + (slot - barWidth) / 2;
          const bar = `<rect x="${x}" y="${y(value)}" width="${barWidth}" height="${value * scaleY}"
            fill="${dataset.backgroundColor}" stroke="${dataset.borderColor}" stroke-width="${dataset.borderWidth}"><title>${label}: ${formatAxisValue(value)}</title></rect>`;
          const text = index % labelEvery === 0
            ? `<text class="chart-label" x="${x + barWidth / 2}" y="${height - paddingY + 16}" text-anchor="middle">${label.slice(5)}</text>`
            : '';
          return bar + text;
        })
        .join('');

      chartEl.innerHTML = `${grid}${bars}
        <text class="chart-label" x="${width - paddingX}" y="${top - 6}" text-anchor="end">${escapeHtml(dataset.label)}</text>`;
    };

    const loadAverages = async () => {
      const res = await fetch(`/api/averages?view=${encodeURIComponent(timeframeEl.value)}`);
      if (!res.ok) {
        throw new Error('Unable to load route averages');
      }
      renderRoutes(await res.json());
    };

    const loadChart = async () => {
      const res = await fetch(`/api/chart?graph_type=${encodeURIComponent(graphTypeEl.value)}`);
      if (!res.ok) {
        throw new Error('Unable to load chart');
      }
      const chart = await res.json();
      chartTitleEl.textContent = chart.title;
      renderBarChart(chart);
    };

    const report = (err) => {
      statusEl.textContent = err.message;
    };

    timeframeEl.addEventListener('change', () => loadAverages().catch(report));
    graphTypeEl.addEventListener('change', () => loadChart().catch(report));

    Promise.all([loadAverages(), loadChart()]).catch(report);
  </script>
</body>
</html>
"#;
