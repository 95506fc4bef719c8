//! Hard-coded portfolio content and the demo posts shipped with the blog.

use chrono::NaiveDate;

use crate::core::models::{Author, Post, PostId};

pub struct Skill {
    pub name: &'static str,
    pub logo: &'static str,
}

pub struct SkillCategory {
    pub title: &'static str,
    pub skills: &'static [Skill],
}

pub struct Experience {
    pub id: Option<u32>,
    pub img: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub date: &'static str,
    pub desc: &'static [&'static str],
    pub skills: &'static [&'static str],
}

pub struct Education {
    pub id: Option<u32>,
    pub img: &'static str,
    pub school: &'static str,
    pub date: &'static str,
    pub grade: &'static str,
    pub desc: &'static str,
    pub degree: &'static str,
}

pub struct Project {
    pub id: Option<u32>,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub tags: &'static [&'static str],
    pub github: &'static str,
    pub webapp: &'static str,
}

/// Portfolio sections addressable from the front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Skills,
    Experience,
    Work,
    Education,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Skills, Section::Experience, Section::Work, Section::Education];

    pub fn title(self) -> &'static str {
        match self {
            Section::Skills => "Skills",
            Section::Experience => "Experience",
            Section::Work => "Work",
            Section::Education => "Education",
        }
    }
}

const DEMO_AUTHOR: &str = "Aditya Belsare";

struct DemoPost {
    id: i64,
    title: &'static str,
    category: &'static str,
    date: (i32, u32, u32),
    excerpt: &'static str,
    content: &'static str,
    tags: &'static [&'static str],
}

static DEMO_POSTS: &[DemoPost] = &[
    DemoPost {
        id: 1,
        title: "Dockerizing Your First App — A Quick Guide",
        category: "DevOps",
        date: (2024, 8, 10),
        excerpt: "Step-by-step guide to containerize a Node.js app using Docker and best practices for images.",
        content: "Full walkthrough: Dockerfile creation, multi-stage builds, optimizing layers, and pushing images to Docker Hub. \n\n## Quick Steps\n1. Create Dockerfile\n2. Build image\n3. Run container\n\n## Best Practices\n- Use .dockerignore\n- Prefer multi-stage builds\n- Keep layers minimal\n\nHappy containerizing!",
        tags: &["docker", "containers", "devops"],
    },
    DemoPost {
        id: 2,
        title: "Kubernetes 101: Deploy an App in 10 Minutes",
        category: "DevOps",
        date: (2024, 7, 2),
        excerpt: "Learn how to create deployments, services, and use kubectl to manage pods for a simple web app.",
        content: "Detailed examples of Deployment YAML, Service types, rolling updates, and basic debugging commands.\n\n### Commands\n`kubectl apply -f deployment.yaml`\n`kubectl get pods`",
        tags: &["kubernetes", "k8s", "devops"],
    },
    DemoPost {
        id: 3,
        title: "CI/CD with GitHub Actions for Infrastructure",
        category: "DevOps",
        date: (2024, 6, 18),
        excerpt: "Automate Terraform runs and linting with GitHub Actions — accelerate infrastructure delivery safely.",
        content: "Example workflows, secrets handling, and tips for dry runs and plan reviews before apply.",
        tags: &["ci/cd", "github-actions", "terraform"],
    },
    DemoPost {
        id: 4,
        title: "Monitoring Basics: Prometheus + Grafana",
        category: "DevOps",
        date: (2024, 5, 12),
        excerpt: "Set up Prometheus scraping and build Grafana dashboards to visualize key metrics for your services.",
        content: "Includes sample Prometheus config and a Grafana dashboard JSON to get started quickly.",
        tags: &["monitoring", "prometheus", "grafana"],
    },
];

/// The built-in posts, in declaration order.
pub fn demo_posts() -> Vec<Post> {
    DEMO_POSTS
        .iter()
        .map(|demo| {
            let (year, month, day) = demo.date;
            Post {
                id: PostId::new(demo.id),
                title: demo.title.to_string(),
                category: demo.category.to_string(),
                date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
                excerpt: demo.excerpt.to_string(),
                content: demo.content.to_string(),
                tags: demo.tags.iter().map(|tag| tag.to_string()).collect(),
                author: Author::named(DEMO_AUTHOR),
                hero_image: None,
                code_url: None,
                live_url: None,
                is_local: false,
            }
        })
        .collect()
}

pub fn is_demo_post(id: PostId) -> bool {
    DEMO_POSTS.iter().any(|demo| demo.id == id.get())
}

static SKILLS: &[SkillCategory] = &[
    SkillCategory {
        title: "Frontend",
        skills: &[
            Skill { name: "HTML", logo: "tech_logo/html.png" },
            Skill { name: "CSS", logo: "tech_logo/css.png" },
            Skill { name: "SASS", logo: "tech_logo/sass.png" },
            Skill { name: "JavaScript", logo: "tech_logo/javascript.png" },
            Skill { name: "React JS", logo: "tech_logo/reactjs.png" },
            Skill { name: "Angular", logo: "tech_logo/angular.png" },
            Skill { name: "Redux", logo: "tech_logo/redux.png" },
            Skill { name: "Next JS", logo: "tech_logo/nextjs.png" },
            Skill { name: "Tailwind CSS", logo: "tech_logo/tailwindcss.png" },
            Skill { name: "GSAP", logo: "tech_logo/gsap.png" },
            Skill { name: "Material UI", logo: "tech_logo/materialui.png" },
            Skill { name: "Bootstrap", logo: "tech_logo/bootstrap.png" },
        ],
    },
    SkillCategory {
        title: "Backend",
        skills: &[
            Skill { name: "Springboot", logo: "tech_logo/springboot.png" },
            Skill { name: "Node JS", logo: "tech_logo/nodejs.png" },
            Skill { name: "Express JS", logo: "tech_logo/express.png" },
            Skill { name: "MySQL", logo: "tech_logo/mysql.png" },
            Skill { name: "MongoDB", logo: "tech_logo/mongodb.png" },
            Skill { name: "Firebase", logo: "tech_logo/firebase.png" },
            Skill { name: "PostgreSQL", logo: "tech_logo/postgre.png" },
        ],
    },
    SkillCategory {
        title: "Languages",
        skills: &[
            Skill { name: "C", logo: "tech_logo/c.png" },
            Skill { name: "C++", logo: "tech_logo/cpp.png" },
            Skill { name: "Java", logo: "tech_logo/java.png" },
            Skill { name: "Python", logo: "tech_logo/python.png" },
            Skill { name: "C-Sharp", logo: "tech_logo/csharp.png" },
            Skill { name: "JavaScript", logo: "tech_logo/javascript.png" },
            Skill { name: "TypeScript", logo: "tech_logo/typescript.png" },
        ],
    },
    SkillCategory {
        title: "Tools",
        skills: &[
            Skill { name: "Git", logo: "tech_logo/git.png" },
            Skill { name: "Jenkins", logo: "tech_logo/github.png" },
            Skill { name: "Terraform", logo: "tech_logo/vscode.png" },
            Skill { name: "Kubernetes", logo: "tech_logo/postman.png" },
            Skill { name: "Grafana", logo: "tech_logo/mc.png" },
            Skill { name: "Prometheus", logo: "tech_logo/vercel.png" },
            Skill { name: "AWS", logo: "tech_logo/netlify.png" },
            Skill { name: "Docker", logo: "tech_logo/figma.png" },
        ],
    },
];

const DEVOPS_STACK: &[&str] = &[
    "Jenkins", "AWS", "Terraform", "Kubernetes", "Docker", "Vault", "Grafana", "Prometheus", "InfluxDB",
];

static EXPERIENCES: &[Experience] = &[
    Experience {
        id: Some(0),
        img: "company_logo/webverse_logo.png",
        role: "DevOps Engineer",
        company: "Infosys Ltd",
        date: "Jan 2022 - Present",
        desc: &[
            "Architected and implemented scalable cloud solutions, enhancing enterprise application performance and resilience.",
            "Executed cloud migration strategies, achieving 25% reduction in infrastructure costs through efficient resource allocation",
            "Configured AWS networking components, including VPCs, subnets, and security groups, to ensure secure connectivity.",
            "Conducted comprehensive cloud infrastructure assessments, identifying optimization opportunities and cost-saving initiatives.",
            "Managed automated deployment pipelines using Jenkins and Docker.",
            "Implemented containerization technologies such as Docker and Kubernetes for faster delivery cycles.",
        ],
        skills: DEVOPS_STACK,
    },
    Experience {
        id: Some(1),
        img: "company_logo/agc_logo.png",
        role: "SRE Engineer",
        company: "Infosys Ltd",
        date: "Jan 2022 - Present",
        desc: &[
            "Engineered cloud-native architectures using AWS EC2, S3, VPC, and ECS for enterprise-scale workloads.",
            "Configured secure infrastructure practices with HashiCorp Vault and AWS Parameter Store for credential management",
            "Orchestrated Kubernetes clusters and containerized workloads with Docker and Helm charts for consistent deployments.",
            "Developed a scalable SRE framework with Terraform and AWS, reducing downtime by over 40%.",
            "Monitored performance metrics utilizing Prometheus, Grafana, and Alertmanager, accelerating incident remediation by 50%.",
            "Implemented blue-green and canary release strategies to enhance reliability during rollouts",
            "Automated CI/CD pipelines integrating application delivery and Infrastructure as Code for efficient provisioning.",
            "Facilitated knowledge sharing sessions to promote team collaboration and continuous learning.",
        ],
        skills: DEVOPS_STACK,
    },
];

static EDUCATION: &[Education] = &[
    Education {
        id: Some(0),
        img: "education_logo/gla_logo.png",
        school: "Tejswini Vidya Mandir",
        date: "2015",
        grade: "85 %",
        desc: "Completed SSC from Maharstra State Board",
        degree: "SSC",
    },
    Education {
        id: Some(1),
        img: "education_logo/bsa_logo.png",
        school: "Government Polytechnic",
        date: "Sept 2018 - Aug 2021",
        grade: "80.25 %",
        desc: "Completed Diploma from RTMNU",
        degree: "Diploma",
    },
    Education {
        id: Some(2),
        img: "education_logo/vps_logo.png",
        school: "G.H Raisoni College of Engineering",
        date: "Apr 2018 - March 2021",
        grade: "76%",
        desc: "I completed my Bachelors from RTMNU",
        degree: "BE",
    },
];

const PROJECT_STACK: &[&str] = &["Jenkins", "Kubernetes", "Docker", "Grafana", "AWS", "CICD", "Prometheus"];

static PROJECTS: &[Project] = &[
    Project {
        id: Some(0),
        title: "EKS through Terraform",
        description: "A powerful and user-friendly React.js application designed to uncover and showcase detailed GitHub profile information. Simply enter a GitHub username, and the app fetches comprehensive data, including profile stats, repositories, followers, and contributions. The intuitive interface ensures a seamless experience, making it a must-visit tool for developers and recruiters.",
        image: "work_logo/github_det.png",
        tags: PROJECT_STACK,
        github: "https://github.com/belsareaditya/Vg_Animation_Admin_Console",
        webapp: "https://vaultguardaditya.netlify.app/",
    },
    Project {
        id: Some(1),
        title: "Vault Guard App",
        description: "Vault Guard App is a secure vault application built to demonstrate strong DevOps practices. The infrastructure was provisioned using Terraform (IaC) and deployed on Amazon EKS (Kubernetes) with containerized workloads using Docker. A full CI/CD pipeline with Jenkins automates build, test, and deployment workflows.",
        image: "work_logo/cs_prep.png",
        tags: PROJECT_STACK,
        github: "https://github.com/belsareaditya/Vg_Animation_Admin_Console",
        webapp: "https://vaultguardaditya.netlify.app/",
    },
];

pub fn skills() -> &'static [SkillCategory] {
    SKILLS
}

pub fn experiences() -> &'static [Experience] {
    EXPERIENCES
}

pub fn education() -> &'static [Education] {
    EDUCATION
}

pub fn projects() -> &'static [Project] {
    PROJECTS
}

/// Display key for a record: its id, or its position when it has none.
pub fn display_key(id: Option<u32>, index: usize) -> usize {
    id.map(|id| id as usize).unwrap_or(index)
}
