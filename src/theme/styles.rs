//! Global CSS styles for HoloCard.
//!
//! Dark holographic palette; each card variant overrides the accent.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  /* Backgrounds */
  --void-black: #000000;
  --void-lighter: #0b0f14;
  --void-border: #1c2530;

  /* Accents */
  --holo-cyan: #00ffff;
  --holo-cyan-glow: rgba(0, 255, 255, 0.3);
  --holo-gold: #d4af37;
  --holo-gold-glow: rgba(212, 175, 55, 0.3);
  --accent: var(--holo-cyan);
  --accent-glow: var(--holo-cyan-glow);

  /* Text */
  --text-primary: #f5f5f5;
  --text-secondary: rgba(245, 245, 245, 0.7);
  --text-muted: rgba(245, 245, 245, 0.5);

  --danger: #ff3366;

  /* Typography */
  --font-sans: 'Inter', 'Segoe UI', system-ui, sans-serif;
  --font-mono: 'JetBrains Mono', 'SF Mono', 'Consolas', monospace;

  --text-xs: 0.75rem;
  --text-sm: 0.875rem;
  --text-base: 1rem;
  --text-lg: 1.125rem;
  --text-xl: 1.5rem;
  --text-2xl: 2rem;

  --transition-fast: 150ms ease;
  --transition-normal: 300ms ease;
}

/* === Global Reset === */
*, *::before, *::after {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

html {
  font-size: 16px;
  -webkit-font-smoothing: antialiased;
}

body {
  font-family: var(--font-sans);
  background: var(--void-black);
  color: var(--text-primary);
  line-height: 1.6;
  min-height: 100vh;
}

/* === Typography === */
.page-title {
  font-size: var(--text-2xl);
  font-weight: 600;
  color: var(--accent);
  text-shadow: 0 0 24px var(--accent-glow);
  letter-spacing: 0.04em;
}

.section-header {
  font-size: var(--text-lg);
  font-weight: 500;
  color: var(--accent);
  margin-bottom: 0.5rem;
}

.body-text {
  font-size: var(--text-base);
  color: var(--text-secondary);
}

.tagline {
  color: var(--text-muted);
  margin-top: 0.5rem;
}

/* === Buttons === */
.btn-primary,
.btn-secondary,
.btn-ghost {
  display: inline-block;
  padding: 0.6rem 1.4rem;
  border-radius: 6px;
  font-family: var(--font-sans);
  font-size: var(--text-sm);
  text-decoration: none;
  cursor: pointer;
  transition: all var(--transition-normal);
}

.btn-primary {
  background: transparent;
  border: 1px solid var(--accent);
  color: var(--text-primary);
}

.btn-primary:hover {
  box-shadow: 0 0 20px var(--accent-glow);
  transform: translateY(-1px);
}

.btn-secondary {
  background: var(--void-lighter);
  border: 1px solid var(--void-border);
  color: var(--text-primary);
}

.btn-ghost {
  background: transparent;
  border: none;
  color: var(--text-muted);
}

.btn-ghost:hover {
  color: var(--text-primary);
}

/* === Landing === */
.landing {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 2rem;
  padding: 4rem 1.5rem;
  text-align: center;
}

.slug-form {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  gap: 0.75rem;
  width: 100%;
  max-width: 420px;
}

.slug-input,
.variant-select {
  flex: 1;
  min-width: 140px;
  padding: 0.6rem 0.9rem;
  background: var(--void-lighter);
  border: 1px solid var(--void-border);
  border-radius: 6px;
  color: var(--text-primary);
  font-family: var(--font-mono);
}

.slug-input:focus {
  outline: none;
  border-color: var(--accent);
}

/* === Card Page === */
.card-page {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 1.5rem;
  padding: 2rem 1rem;
  min-height: 100vh;
}

.card-page.variant-tres {
  --accent: var(--holo-gold);
  --accent-glow: var(--holo-gold-glow);
}

.card-page.variant-classic {
  background: linear-gradient(180deg, #0b0f14 0%, #000000 100%);
}

.card-page.variant-futuristic {
  background: radial-gradient(circle at top, rgba(0, 255, 255, 0.12), transparent 60%), var(--void-black);
}

.card-loading,
.card-missing {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 1rem;
  padding: 4rem 1rem;
  text-align: center;
}

.spinner {
  width: 36px;
  height: 36px;
  border: 2px solid var(--void-border);
  border-top-color: var(--accent);
  border-radius: 50%;
  animation: spin 1s linear infinite;
}

@keyframes spin {
  to { transform: rotate(360deg); }
}

/* === Digital Card === */
.digital-card {
  width: 100%;
  max-width: 420px;
  background: var(--void-lighter);
  border: 1px solid var(--void-border);
  border-radius: 16px;
  padding: 2rem 1.5rem;
  box-shadow: 0 0 40px var(--accent-glow);
  display: flex;
  flex-direction: column;
  gap: 1.5rem;
}

.digital-card__header {
  display: flex;
  flex-direction: column;
  align-items: center;
  text-align: center;
  gap: 0.25rem;
}

.digital-card__avatar {
  width: 120px;
  height: 120px;
  border-radius: 50%;
  object-fit: cover;
  border: 2px solid var(--accent);
  margin-bottom: 0.75rem;
}

.digital-card__avatar--initials {
  display: flex;
  align-items: center;
  justify-content: center;
  font-size: var(--text-2xl);
  color: var(--accent);
}

.digital-card__name {
  font-size: var(--text-xl);
  font-weight: 600;
}

.digital-card__title {
  color: var(--accent);
}

.digital-card__location {
  color: var(--text-muted);
  font-size: var(--text-sm);
}

.skill-list {
  list-style: none;
  display: flex;
  flex-wrap: wrap;
  gap: 0.5rem;
}

.skill-chip {
  padding: 0.2rem 0.7rem;
  border: 1px solid var(--void-border);
  border-radius: 999px;
  font-size: var(--text-xs);
  color: var(--text-secondary);
}

.digital-card__actions {
  display: flex;
  justify-content: center;
  gap: 0.75rem;
}

.social-links {
  display: flex;
  flex-wrap: wrap;
  justify-content: center;
  gap: 0.75rem;
}

.social-link {
  color: var(--accent);
  font-size: var(--text-sm);
  text-decoration: none;
}

.social-link:hover {
  text-decoration: underline;
}

.digital-card__footer {
  display: flex;
  flex-direction: column;
  align-items: center;
  gap: 0.5rem;
}

.card-qr svg {
  width: 140px;
  height: 140px;
}

.card-url,
.qr-error {
  font-family: var(--font-mono);
  font-size: var(--text-xs);
  color: var(--text-muted);
  word-break: break-all;
}

/* === Install Banner === */
.install-banner {
  width: 100%;
  max-width: 420px;
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
  padding: 1rem 1.25rem;
  background: var(--void-lighter);
  border: 1px solid var(--accent);
  border-radius: 12px;
}

.install-banner__text {
  display: flex;
  flex-direction: column;
  font-size: var(--text-sm);
}

.install-banner__text span {
  color: var(--text-muted);
}

.install-banner__actions {
  display: flex;
  gap: 0.5rem;
  flex-shrink: 0;
}

.install-note {
  font-size: var(--text-xs);
  color: var(--text-muted);
}

/* === Modal === */
.modal-overlay {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.85);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 1000;
  padding: 2rem;
}

.modal-content {
  background: var(--void-lighter);
  border: 1px solid var(--void-border);
  border-radius: 12px;
  max-width: 380px;
  width: 100%;
  padding: 1.5rem;
  display: flex;
  flex-direction: column;
  gap: 1rem;
}

.modal-title {
  font-size: var(--text-lg);
  font-weight: 600;
}

.modal-actions {
  display: flex;
  justify-content: flex-end;
  gap: 0.75rem;
}

/* === Head Preview === */
.head-preview {
  width: 100%;
  max-width: 420px;
  font-size: var(--text-xs);
  color: var(--text-muted);
}

.head-preview summary {
  cursor: pointer;
}

.head-preview__html {
  margin-top: 0.5rem;
  padding: 0.75rem;
  background: var(--void-lighter);
  border: 1px solid var(--void-border);
  border-radius: 6px;
  font-family: var(--font-mono);
  white-space: pre-wrap;
  word-break: break-all;
}
"#;
