//! Upload form — a minimal static page for trying the service from a browser.

use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Leafsense — Plant Disease Scanner</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; color: #1d3520; }
    h1 { color: #2e7d32; }
    fieldset { border: 1px solid #a5d6a7; border-radius: 8px; padding: 1rem; }
    button { background: #2e7d32; color: white; border: 0; border-radius: 6px; padding: 0.6rem 1.4rem; cursor: pointer; }
    pre { background: #f1f8e9; padding: 1rem; border-radius: 8px; overflow-x: auto; }
  </style>
</head>
<body>
  <h1>🌱 Leafsense</h1>
  <p>Upload a photo of a plant leaf to identify the disease and get treatment and prevention guidance.</p>
  <form id="scan-form">
    <fieldset>
      <p><label>Leaf photo <input type="file" name="file" accept="image/*" required></label></p>
      <p><label>Language
        <select name="lang">
          <option value="en">English</option>
          <option value="ig">Igbo</option>
          <option value="ha">Hausa</option>
          <option value="yo">Yoruba</option>
          <option value="fr">French</option>
          <option value="es">Spanish</option>
          <option value="sw">Swahili</option>
          <option value="de">German</option>
        </select>
      </label></p>
      <p><button type="submit">Scan leaf</button></p>
    </fieldset>
  </form>
  <pre id="result" hidden></pre>
  <script>
    const form = document.getElementById('scan-form');
    const result = document.getElementById('result');
    form.addEventListener('submit', async (e) => {
      e.preventDefault();
      const data = new FormData();
      data.append('file', form.elements.file.files[0]);
      result.hidden = false;
      result.textContent = 'Scanning…';
      const response = await fetch('/predict?lang=' + form.elements.lang.value, {
        method: 'POST',
        body: data,
      });
      result.textContent = JSON.stringify(await response.json(), null, 2);
    });
  </script>
</body>
</html>
"#;

/// `GET /` — static upload form.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
