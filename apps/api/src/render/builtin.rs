//! Templates shipped with the service. Always available, addressed by slug.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltinTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub html: &'static str,
    pub css: &'static str,
}

const CLASSIC_HTML: &str = r#"<header>
  <h1>{{personalInfo.fullName}}</h1>
  <p class="contact">{{personalInfo.email}}{{#if personalInfo.phone}} · {{personalInfo.phone}}{{/if}}{{#if personalInfo.address}} · {{personalInfo.address}}{{/if}}</p>
  {{#if personalInfo.summary}}<p class="summary">{{personalInfo.summary}}</p>{{/if}}
</header>
{{#if personalDetails}}
<section>
  <h2>Personal Details</h2>
  <dl>
    {{#if personalDetails.dateOfBirth}}<dt>Date of Birth</dt><dd>{{personalDetails.dateOfBirth}}</dd>{{/if}}
    {{#if personalDetails.nationality}}<dt>Nationality</dt><dd>{{personalDetails.nationality}}</dd>{{/if}}
    {{#if personalDetails.religion}}<dt>Religion</dt><dd>{{personalDetails.religion}}</dd>{{/if}}
    {{#if personalDetails.maritalStatus}}<dt>Marital Status</dt><dd>{{capitalize personalDetails.maritalStatus}}</dd>{{/if}}
    {{#if personalDetails.height}}<dt>Height</dt><dd>{{personalDetails.height}}</dd>{{/if}}
    {{#if personalDetails.languages}}<dt>Languages</dt><dd>{{personalDetails.languages}}</dd>{{/if}}
  </dl>
</section>
{{/if}}
{{#if family}}
<section>
  <h2>Family</h2>
  <ul>{{#each family}}<li><strong>{{capitalize relation}}:</strong> {{name}}{{#if occupation}}, {{occupation}}{{/if}}</li>{{/each}}</ul>
</section>
{{/if}}
{{#if experience}}
<section>
  <h2>Experience</h2>
  {{#each experience}}
  <div class="entry">
    <div class="entry-head"><strong>{{position}}</strong>, {{company}}<span class="dates">{{formatDate startDate}} – {{#if current}}Present{{else}}{{formatDate endDate}}{{/if}}</span></div>
    {{#if description}}<p>{{description}}</p>{{/if}}
  </div>
  {{/each}}
</section>
{{/if}}
{{#if research}}
<section>
  <h2>Research</h2>
  {{#each research}}
  <div class="entry">
    <div class="entry-head"><strong>{{title}}</strong>, {{institution}}{{#if startDate}}<span class="dates">{{formatDate startDate}} – {{formatDate endDate}}</span>{{else}}{{#if endDate}}<span class="dates">{{formatDate endDate}}</span>{{/if}}{{/if}}</div>
    {{#if supervisor}}<p>Supervisor: {{supervisor}}</p>{{/if}}
    {{#if description}}<p>{{description}}</p>{{/if}}
  </div>
  {{/each}}
</section>
{{/if}}
{{#if education}}
<section>
  <h2>Education</h2>
  {{#each education}}
  <div class="entry">
    <div class="entry-head"><strong>{{degree}}</strong>{{#if fieldOfStudy}} in {{fieldOfStudy}}{{/if}}, {{institution}}{{#if endDate}}<span class="dates">{{formatDate endDate}}</span>{{/if}}</div>
    {{#if grade}}<p>Grade: {{grade}}</p>{{/if}}
  </div>
  {{/each}}
</section>
{{/if}}
{{#if publications}}
<section>
  <h2>Publications</h2>
  <ol>{{#each publications}}<li>{{#if authors}}{{authors}}. {{/if}}<em>{{title}}</em>{{#if venue}}. {{venue}}{{/if}}{{#if year}} ({{year}}){{/if}}</li>{{/each}}</ol>
</section>
{{/if}}
{{#if achievements}}
<section>
  <h2>Achievements</h2>
  <ul>{{#each achievements}}<li><strong>{{title}}</strong>{{#if issuer}}, {{issuer}}{{/if}}{{#if year}} ({{year}}){{/if}}</li>{{/each}}</ul>
</section>
{{/if}}
{{#if skills}}
<section>
  <h2>Skills</h2>
  <p class="skills">{{#each skills}}{{name}}{{#if level}} ({{capitalize level}}){{/if}}{{#unless @last}}, {{/unless}}{{/each}}</p>
</section>
{{/if}}
{{#if hobbies}}
<section>
  <h2>Hobbies</h2>
  <p>{{#each hobbies}}{{this}}{{#unless @last}}, {{/unless}}{{/each}}</p>
</section>
{{/if}}
"#;

const CLASSIC_CSS: &str = r#"body { font-family: Georgia, serif; font-size: 11pt; margin: 0.75in; color: #222; }
h1 { font-size: 22pt; margin: 0 0 4pt; }
h2 { font-size: 13pt; border-bottom: 1pt solid #444; margin: 14pt 0 6pt; text-transform: uppercase; }
.contact { margin: 0; color: #555; }
.summary { margin-top: 8pt; }
.entry { margin-bottom: 8pt; }
.entry-head { display: flex; justify-content: space-between; gap: 8pt; }
.dates { color: #555; white-space: nowrap; }
dl { display: grid; grid-template-columns: 1.6in 1fr; row-gap: 2pt; }
dt { font-weight: bold; }
dd { margin: 0; }
"#;

const MODERN_HTML: &str = r#"<div class="page">
  <aside>
    <h1>{{personalInfo.fullName}}</h1>
    <ul class="contact">
      <li>{{personalInfo.email}}</li>
      {{#if personalInfo.phone}}<li>{{personalInfo.phone}}</li>{{/if}}
      {{#if personalInfo.linkedin}}<li>{{personalInfo.linkedin}}</li>{{/if}}
      {{#if personalInfo.website}}<li>{{personalInfo.website}}</li>{{/if}}
    </ul>
    {{#if skills}}
    <h2>Skills</h2>
    <ul class="skills">{{#each skills}}<li>{{name}}{{#if (eq level "expert")}} ★{{/if}}</li>{{/each}}</ul>
    {{/if}}
  </aside>
  <main>
    {{#if personalInfo.summary}}<p class="summary">{{personalInfo.summary}}</p>{{/if}}
    {{#if experience}}
    <h2>Experience</h2>
    {{#each experience}}
    <article>
      <h3>{{position}} <span>@ {{company}}</span></h3>
      <p class="dates">{{formatDate startDate}} – {{#if current}}Present{{else}}{{formatDate endDate}}{{/if}}{{#if location}} · {{location}}{{/if}}</p>
      {{#if description}}<p>{{description}}</p>{{/if}}
    </article>
    {{/each}}
    {{/if}}
    {{#if education}}
    <h2>Education</h2>
    {{#each education}}
    <article>
      <h3>{{degree}} <span>{{institution}}</span></h3>
      {{#if startDate}}<p class="dates">{{formatDate startDate}} – {{formatDate endDate}}</p>{{else}}{{#if endDate}}<p class="dates">{{formatDate endDate}}</p>{{/if}}{{/if}}
    </article>
    {{/each}}
    {{/if}}
    {{#if publications}}
    <h2>Publications</h2>
    <ul>{{#each publications}}<li>{{title}}{{#if year}} ({{year}}){{/if}}</li>{{/each}}</ul>
    {{/if}}
  </main>
</div>
"#;

const MODERN_CSS: &str = r#"body { font-family: "Helvetica Neue", Arial, sans-serif; font-size: 10pt; margin: 0; color: #1f2933; }
.page { display: grid; grid-template-columns: 2.4in 1fr; min-height: 11in; }
aside { background: #1f2933; color: #f5f7fa; padding: 0.5in 0.3in; }
main { padding: 0.5in 0.4in; }
h1 { font-size: 20pt; margin: 0 0 10pt; }
h2 { font-size: 12pt; letter-spacing: 1pt; text-transform: uppercase; margin: 16pt 0 6pt; }
h3 { font-size: 11pt; margin: 0; }
h3 span { font-weight: normal; color: #52606d; }
ul { list-style: none; padding: 0; margin: 0; }
.dates { color: #7b8794; margin: 2pt 0 4pt; }
article { margin-bottom: 10pt; }
"#;

static BUILTIN_TEMPLATES: [BuiltinTemplate; 2] = [
    BuiltinTemplate {
        id: "classic",
        name: "Classic",
        description: "Single column, serif, suits every document type",
        html: CLASSIC_HTML,
        css: CLASSIC_CSS,
    },
    BuiltinTemplate {
        id: "modern",
        name: "Modern",
        description: "Two columns with a dark sidebar, best for resumes",
        html: MODERN_HTML,
        css: MODERN_CSS,
    },
];

pub const DEFAULT_TEMPLATE_ID: &str = "classic";

pub fn builtin_templates() -> &'static [BuiltinTemplate] {
    &BUILTIN_TEMPLATES
}

pub fn builtin_template(id: &str) -> Option<&'static BuiltinTemplate> {
    BUILTIN_TEMPLATES.iter().find(|t| t.id == id)
}
